// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Anything that went wrong retrieving or parsing the feed. Aborts the run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status} when fetching {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("feed parse error: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("serializing books: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
