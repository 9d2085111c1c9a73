// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "GOODREADS_CONFIG_PATH";
pub const ENV_FEED_URL: &str = "GOODREADS_RSS_FEED_URL";
pub const ENV_OUT_FILE: &str = "GOODREADS_OUT_FILE";

/// Hugo-style data directory file.
pub const DEFAULT_OUT_FILE: &str = "data/goodreads.books.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// `None` (or blank) means "not configured"; the run is skipped.
    pub feed_url: Option<String>,
    pub out_file: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            out_file: PathBuf::from(DEFAULT_OUT_FILE),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    feed_url: Option<String>,
    out_file: Option<PathBuf>,
}

impl FileConfig {
    fn into_config(self) -> ExportConfig {
        ExportConfig {
            feed_url: self.feed_url,
            out_file: self
                .out_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_FILE)),
        }
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<ExportConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing config {}", path.display()))
}

/// Load config using env var + fallbacks, then apply env overrides:
/// 1) $GOODREADS_CONFIG_PATH
/// 2) config/goodreads.toml
/// 3) config/goodreads.json
/// 4) built-in defaults
///
/// `GOODREADS_RSS_FEED_URL` and `GOODREADS_OUT_FILE` override file values.
pub fn load_config_default() -> Result<ExportConfig> {
    let mut cfg = load_config_file()?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn load_config_file() -> Result<ExportConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/goodreads.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/goodreads.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(ExportConfig::default())
}

fn apply_env_overrides(cfg: &mut ExportConfig) {
    if let Ok(url) = std::env::var(ENV_FEED_URL) {
        cfg.feed_url = Some(url);
    }
    if let Ok(out) = std::env::var(ENV_OUT_FILE) {
        if !out.trim().is_empty() {
            cfg.out_file = PathBuf::from(out);
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<ExportConfig> {
    let parsed: FileConfig = match hint_ext {
        "json" => serde_json::from_str(s)?,
        "toml" => toml::from_str(s)?,
        // No hint: JSON first, then TOML.
        _ => match serde_json::from_str(s) {
            Ok(v) => v,
            Err(_) => toml::from_str(s).map_err(|_| anyhow!("unsupported config format"))?,
        },
    };
    Ok(parsed.into_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn toml_and_json_formats_work() {
        let toml = r#"
feed_url = "https://www.goodreads.com/review/list_rss/1?shelf=read"
out_file = "site/data/books.json"
"#;
        let cfg = parse_config(toml, "toml").unwrap();
        assert_eq!(
            cfg.feed_url.as_deref(),
            Some("https://www.goodreads.com/review/list_rss/1?shelf=read")
        );
        assert_eq!(cfg.out_file, PathBuf::from("site/data/books.json"));

        let json = r#"{"feed_url": "https://x.test/rss"}"#;
        let cfg = parse_config(json, "").unwrap();
        assert_eq!(cfg.feed_url.as_deref(), Some("https://x.test/rss"));
        assert_eq!(cfg.out_file, PathBuf::from(DEFAULT_OUT_FILE));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_config("feed_url = [", "").is_err());
        assert!(parse_config("{", "json").is_err());
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_FEED_URL);
        env::remove_var(ENV_OUT_FILE);

        // Nothing on disk → defaults
        let cfg = load_config_default().unwrap();
        assert_eq!(cfg, ExportConfig::default());

        // Env URL overrides
        env::set_var(ENV_FEED_URL, "https://x.test/rss");
        let cfg = load_config_default().unwrap();
        assert_eq!(cfg.feed_url.as_deref(), Some("https://x.test/rss"));
        env::remove_var(ENV_FEED_URL);

        // Missing explicit path is an error
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
        assert!(load_config_default().is_err());
        env::remove_var(ENV_CONFIG_PATH);

        env::set_current_dir(&old).unwrap();
    }
}
