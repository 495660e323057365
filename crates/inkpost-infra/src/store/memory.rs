//! In-memory post store - used as fallback when the data file cannot be opened.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use inkpost_core::StoreError;
use inkpost_core::domain::{Post, PostCollection, PostId};
use inkpost_core::ports::{Clock, PostStore};

/// Post store holding the collection in process memory.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    posts: RwLock<PostCollection>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPostStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_posts(PostCollection::new(), clock)
    }

    /// Start from an existing collection.
    pub fn with_posts(posts: PostCollection, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: RwLock::new(posts),
            clock,
        }
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn append(&self, content: String) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;
        posts.append(content, self.clock.now_millis())
    }

    async fn read_raw(&self) -> Result<Vec<u8>, StoreError> {
        let posts = self.posts.read().await;
        posts
            .to_pretty_json()
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().await.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now_millis(&self) -> u64 {
            100
        }
    }

    #[tokio::test]
    async fn test_append_and_find() {
        let store = InMemoryPostStore::new(Arc::new(FixedClock));
        let post = store.append("hello".to_string()).await.unwrap();

        assert_eq!(post.id, PostId::new(100));
        assert_eq!(store.find(post.id).await.unwrap(), Some(post));
        assert_eq!(store.find(PostId::new(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_raw_matches_file_format() {
        let seeded = PostCollection::from_json(br#"{"1000": "a"}"#).unwrap();
        let store = InMemoryPostStore::with_posts(seeded, Arc::new(FixedClock));
        store.append("b".to_string()).await.unwrap();

        let raw = String::from_utf8(store.read_raw().await.unwrap()).unwrap();
        assert_eq!(raw, "{\n  \"1000\": \"a\",\n  \"1001\": \"b\"\n}\n");
    }
}
