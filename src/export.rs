// src/export.rs
use std::fs;
use std::path::{Path, PathBuf};

use metrics::{counter, gauge};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::feed::types::{BookEntry, BookSource, FetchOutcome};
use crate::feed::GoodreadsRssProvider;
use crate::normalize::normalize_book;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub written: usize,
    pub out_file: PathBuf,
    /// No feed configured; the output file was not touched.
    pub skipped: bool,
}

/// Pretty JSON (2-space indent), no trailing newline.
pub fn render_books(books: &[BookEntry]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(books)?)
}

/// Create parent dirs and fully replace `path`.
pub fn write_books(path: &Path, books: &[BookEntry]) -> Result<(), ExportError> {
    let json = render_books(books)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Fetch → normalize → write. A skipped fetch writes nothing; an empty but
/// successful fetch still writes `[]`.
pub async fn export_books(
    source: &dyn BookSource,
    out_file: &Path,
) -> Result<ExportReport, ExportError> {
    let items = match source.fetch_latest().await? {
        FetchOutcome::Skipped => {
            return Ok(ExportReport {
                written: 0,
                out_file: out_file.to_path_buf(),
                skipped: true,
            })
        }
        FetchOutcome::Fetched(items) => items,
    };

    let books: Vec<BookEntry> = items.into_iter().map(normalize_book).collect();
    write_books(out_file, &books)?;

    counter!("goodreads_books_written_total").increment(books.len() as u64);
    gauge!("goodreads_export_last_count").set(books.len() as f64);
    tracing::info!(
        source = source.name(),
        count = books.len(),
        path = %out_file.display(),
        "wrote books"
    );

    Ok(ExportReport {
        written: books.len(),
        out_file: out_file.to_path_buf(),
        skipped: false,
    })
}

/// Build the HTTP provider from config and export once.
pub async fn run_from_config(cfg: &ExportConfig) -> Result<ExportReport, ExportError> {
    let provider = GoodreadsRssProvider::from_url(cfg.feed_url.clone().unwrap_or_default());
    export_books(&provider, &cfg.out_file).await
}
