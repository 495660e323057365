//! Domain-level error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::PostId;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: PostId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Post store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Post store not found at {}", .path.display())]
    Missing { path: PathBuf },

    #[error("Post store at {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("No post ids left after {}", u64::MAX)]
    IdsExhausted,
}

impl StoreError {
    /// Classify an I/O error, folding `NotFound` into [`StoreError::Missing`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::Missing { path }
        } else {
            StoreError::Io { path, source }
        }
    }
}
