//! JSON file post store.
//!
//! The whole collection lives in one pretty-printed JSON document. Appends run a
//! full read-modify-write cycle under a single-writer lock, and the file is
//! replaced atomically (temp file + fsync + rename) so readers never observe a
//! partial write.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use inkpost_core::StoreError;
use inkpost_core::domain::{Post, PostCollection, PostId};
use inkpost_core::ports::{Clock, PostStore};

/// Post store backed by a single JSON file.
pub struct JsonFilePostStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl JsonFilePostStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// collection if the file does not exist yet. An existing file is left as is.
    pub async fn open(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        if exists {
            tracing::info!(path = %path.display(), "Opened existing post store");
        } else {
            let empty = encode(&PostCollection::new())?;
            atomic_write_file(&path, &empty).await?;
            tracing::info!(path = %path.display(), "Initialized empty post store");
        }

        Ok(Self {
            path,
            clock,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<PostCollection, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))?;

        PostCollection::from_json(&bytes).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl PostStore for JsonFilePostStore {
    async fn append(&self, content: String) -> Result<Post, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut posts = self.load().await?;
        let post = posts.append(content, self.clock.now_millis())?;
        atomic_write_file(&self.path, &encode(&posts)?).await?;

        tracing::debug!(
            id = %post.id,
            content_len = post.content.len(),
            total = posts.len(),
            "Post appended"
        );

        Ok(post)
    }

    async fn read_raw(&self) -> Result<Vec<u8>, StoreError> {
        fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.path, e))
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.load().await?.get(id))
    }
}

fn encode(posts: &PostCollection) -> Result<Vec<u8>, StoreError> {
    posts
        .to_pretty_json()
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Write data to a temp file next to `final_path`, fsync it, then rename it into place.
async fn atomic_write_file(final_path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let file_name = final_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("posts");
    let temp_path = final_path.with_file_name(format!("{}.{}.tmp", file_name, std::process::id()));

    let mut file = fs::File::create(&temp_path)
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;
    file.write_all(data)
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| StoreError::io(&temp_path, e))?;
    fs::rename(&temp_path, final_path)
        .await
        .map_err(|e| StoreError::io(final_path, e))?;
    Ok(())
}
