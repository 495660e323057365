use async_trait::async_trait;

use crate::domain::{Post, PostId};
use crate::error::StoreError;

/// Post store - owns durable storage of the post collection.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Append a post under a newly allocated, unique id.
    async fn append(&self, content: String) -> Result<Post, StoreError>;

    /// Raw bytes of the stored collection, exactly as persisted.
    async fn read_raw(&self) -> Result<Vec<u8>, StoreError>;

    /// Look up a single post by id.
    async fn find(&self, id: PostId) -> Result<Option<Post>, StoreError>;
}
