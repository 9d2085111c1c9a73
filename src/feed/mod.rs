// src/feed/mod.rs
pub mod fields;
pub mod parser;
pub mod providers;
pub mod types;

pub use providers::goodreads_rss::{fetch_books, GoodreadsRssProvider};
pub use types::{BookEntry, BookSource, FetchOutcome};
