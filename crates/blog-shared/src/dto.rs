//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Serialized form of a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    /// RFC 3339 timestamp.
    pub created_at: String,
    /// RFC 3339 timestamp.
    pub updated_at: String,
}

/// Query string accepted by the post list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

impl SearchQuery {
    /// Build from raw query pairs. A repeated `search` key keeps its last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let search = pairs
            .into_iter()
            .filter(|(key, _)| key == "search")
            .map(|(_, value)| value)
            .last();
        Self { search }
    }

    /// The search term, or `None` when absent or blank.
    pub fn term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}
