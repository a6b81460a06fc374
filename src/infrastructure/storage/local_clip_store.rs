use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ClipStore, ClipStoreError};
use crate::domain::{AudioFormat, StoredClip};

/// Clip storage backed by a directory on the local filesystem.
pub struct LocalClipStore {
    inner: Arc<LocalFileSystem>,
    base_dir: PathBuf,
}

impl LocalClipStore {
    pub fn new(base_dir: PathBuf) -> Result<Self, ClipStoreError> {
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            ClipStoreError::PutFailed(format!("create {}: {}", base_dir.display(), e))
        })?;

        let fs = LocalFileSystem::new_with_prefix(&base_dir)
            .map_err(|e| ClipStoreError::PutFailed(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(fs),
            base_dir,
        })
    }
}

#[async_trait]
impl ClipStore for LocalClipStore {
    async fn store(&self, filename: &str, data: Bytes) -> Result<(), ClipStoreError> {
        let location = StorePath::from(filename);
        self.inner
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| ClipStoreError::PutFailed(e.to_string()))?;
        Ok(())
    }

    async fn exists(&self, filename: &str) -> Result<bool, ClipStoreError> {
        let location = StorePath::from(filename);
        match self.inner.head(&location).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(ClipStoreError::StatFailed(e.to_string())),
        }
    }

    fn clip_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    async fn list(&self) -> Result<Vec<StoredClip>, ClipStoreError> {
        let mut entries = self.inner.list(None);
        let mut clips = Vec::new();

        while let Some(entry) = entries.next().await {
            let meta = entry.map_err(|e| ClipStoreError::ListFailed(e.to_string()))?;

            let Some(filename) = meta.location.filename().map(str::to_string) else {
                continue;
            };
            if AudioFormat::from_path(Path::new(&filename)).is_none() {
                continue;
            }

            clips.push(StoredClip::new(
                filename,
                meta.size as u64,
                meta.last_modified,
            ));
        }

        clips.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(clips)
    }

    async fn delete(&self, filename: &str) -> Result<bool, ClipStoreError> {
        let location = StorePath::from(filename);
        match self.inner.delete(&location).await {
            Ok(()) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(ClipStoreError::DeleteFailed(e.to_string())),
        }
    }
}
