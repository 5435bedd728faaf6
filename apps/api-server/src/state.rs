//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, DatabaseConnections, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use blog_infra::PostgresPostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// `None` when running on the in-memory store.
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with the appropriate store.
    ///
    /// Falls back to the in-memory store when no database is configured or it
    /// cannot be reached.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let state = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let posts = Arc::new(PostgresPostRepository::new(conn.main.clone()));
                    Self {
                        posts,
                        db: Some(conn),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            if db_config.is_some() {
                tracing::warn!("Built without postgres feature - DATABASE_URL is ignored");
            }
            Self::in_memory()
        };

        tracing::info!(store = state.store_name(), "Application state initialized");
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            db: None,
        }
    }

    pub fn store_name(&self) -> &'static str {
        if self.db.is_some() { "postgres" } else { "in-memory" }
    }
}
