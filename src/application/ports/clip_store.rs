use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::domain::StoredClip;

#[derive(Debug, Error)]
pub enum ClipStoreError {
    #[error("failed to store clip: {0}")]
    PutFailed(String),
    #[error("failed to stat clip: {0}")]
    StatFailed(String),
    #[error("failed to list clips: {0}")]
    ListFailed(String),
    #[error("failed to delete clip: {0}")]
    DeleteFailed(String),
}

/// Storage for uploaded audio clips awaiting transcription.
#[async_trait]
pub trait ClipStore: Send + Sync {
    async fn store(&self, filename: &str, data: Bytes) -> Result<(), ClipStoreError>;

    async fn exists(&self, filename: &str) -> Result<bool, ClipStoreError>;

    /// Filesystem path handed to transcribers for this clip.
    fn clip_path(&self, filename: &str) -> PathBuf;

    /// Stored clips with a supported audio extension, newest metadata wins.
    async fn list(&self) -> Result<Vec<StoredClip>, ClipStoreError>;

    /// Removes the clip, reporting whether it was present.
    async fn delete(&self, filename: &str) -> Result<bool, ClipStoreError>;
}
