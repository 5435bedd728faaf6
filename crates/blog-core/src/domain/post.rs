use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned post identifier.
pub type PostId = i32;

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Case-insensitive substring match against title, content and category.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.title, &self.content, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// A validated post that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl NewPost {
    /// Turn into a stored post with the given id, stamping both timestamps.
    pub fn into_post(self, id: PostId, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            category: self.category,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated field replacements for an existing post.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostChanges {
    /// Overwrite the supplied fields on `post` and refresh `updated_at`.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
        post.updated_at = Utc::now().max(post.created_at);
    }
}
