// src/feed/types.rs
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One feed item: a book plus the shelf event that put it in the feed.
///
/// Field order is the JSON key order. Absent optional fields are omitted,
/// a present-but-empty feed element stays `Some("")`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,

    pub title: String,
    pub link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_small_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_medium_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_large_image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<String>, // feed-native, not always numeric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_read_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_date_added: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_shelves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_review: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_published: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl BookEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Self::default()
        }
    }
}

/// Result of asking a source for its books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No feed URL configured. Not a failure; nothing was fetched.
    Skipped,
    Fetched(Vec<BookEntry>),
}

impl FetchOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::Skipped)
    }

    pub fn into_items(self) -> Vec<BookEntry> {
        match self {
            FetchOutcome::Skipped => Vec::new(),
            FetchOutcome::Fetched(items) => items,
        }
    }
}

#[async_trait::async_trait]
pub trait BookSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<FetchOutcome, FetchError>;
    fn name(&self) -> &'static str;
}
