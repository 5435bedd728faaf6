//! In-memory post repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use blog_core::domain::{NewPost, Post, PostId};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

struct Store {
    posts: BTreeMap<PostId, Post>,
    next_id: PostId,
}

/// In-memory post store keyed by id, guarded by an async RwLock.
///
/// Ids come from a counter that never goes backwards, so a deleted id is never reused.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<Store>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                posts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, PostId> for InMemoryPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.values().cloned().collect())
    }

    async fn delete(&self, id: PostId) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .posts
            .values()
            .filter(|post| post.matches(term))
            .cloned()
            .collect())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepoError::Query("post id sequence exhausted".to_string()))?;

        let post = new_post.into_post(id, Utc::now());
        store.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        let slot = store.posts.get_mut(&post.id).ok_or(RepoError::NotFound)?;

        // created_at belongs to the stored row.
        let updated = Post {
            created_at: slot.created_at,
            ..post
        };
        *slot = updated.clone();
        Ok(updated)
    }
}
