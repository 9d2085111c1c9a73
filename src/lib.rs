// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod error;
pub mod export;
pub mod feed;
pub mod normalize;

// ---- Re-exports for stable public API ----
pub use crate::config::ExportConfig;
pub use crate::error::{ExportError, FetchError};
pub use crate::export::{export_books, run_from_config, ExportReport};
pub use crate::feed::{fetch_books, BookEntry, BookSource, FetchOutcome};
pub use crate::normalize::normalize_book;
