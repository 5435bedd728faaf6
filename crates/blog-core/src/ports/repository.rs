use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId};
use crate::error::RepoError;

/// Generic repository trait defining the read and delete operations every store offers.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID. `Ok(None)` when it does not exist.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Every entity, in the store's natural order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` when nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, PostId> {
    /// Posts whose title, content or category contain `term`, ignoring case.
    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError>;

    /// Persist a new post; the store assigns the id and timestamps.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace a stored post wholesale. `RepoError::NotFound` if it is gone.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;
}
