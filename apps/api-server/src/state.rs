//! Application state - shared across all handlers.

use std::sync::Arc;

use inkpost_core::ports::{Clock, PostStore};
use inkpost_infra::{InMemoryPostStore, JsonFilePostStore, SystemClock};

use crate::config::{AppConfig, DEFAULT_MAX_POST_BYTES, StoreBackend};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub max_post_bytes: usize,
}

impl AppState {
    /// Build the application state with the configured store backend.
    pub async fn new(config: &AppConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let posts: Arc<dyn PostStore> = match config.store_backend {
            StoreBackend::File => {
                match JsonFilePostStore::open(&config.posts_file, clock.clone()).await {
                    Ok(store) => Arc::new(store),
                    Err(e) => {
                        tracing::error!(
                            "Failed to open post store: {}. Using in-memory fallback.",
                            e
                        );
                        Arc::new(InMemoryPostStore::new(clock))
                    }
                }
            }
            StoreBackend::Memory => {
                tracing::warn!("STORE_BACKEND=memory. Posts will not survive a restart.");
                Arc::new(InMemoryPostStore::new(clock))
            }
        };

        tracing::info!("Application state initialized");

        Self::with_store(posts).with_max_post_bytes(config.max_post_bytes)
    }

    pub fn with_store(posts: Arc<dyn PostStore>) -> Self {
        Self {
            posts,
            max_post_bytes: DEFAULT_MAX_POST_BYTES,
        }
    }

    pub fn with_max_post_bytes(mut self, max_post_bytes: usize) -> Self {
        self.max_post_bytes = max_post_bytes;
        self
    }
}
