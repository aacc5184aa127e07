//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends
//! must implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Backends transfer the full byte content in one call: the object is either
/// fully retrievable under the key afterwards or the call fails. No partial
/// visibility, no automatic retry; callers that need resilience wrap this
/// themselves.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload the full content under `key` with the declared content type.
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Public URL under which an object stored at `key` is reachable.
    fn public_url(&self, key: &str) -> String;
}
