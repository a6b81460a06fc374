use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArtifactStore, ArtifactStoreError, TranscriptArtifact};

/// Transcript and report storage backed by a directory on the local
/// filesystem.
///
/// Transcripts are named `{stem}_{model_id}.txt` so everything belonging to
/// one clip shares the clip's stem as a prefix.
pub struct LocalArtifactStore {
    inner: Arc<LocalFileSystem>,
    base_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(base_dir: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            ArtifactStoreError::WriteFailed(format!("create {}: {}", base_dir.display(), e))
        })?;

        let fs = LocalFileSystem::new_with_prefix(&base_dir)
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(fs),
            base_dir,
        })
    }

    async fn list_filenames(&self) -> Result<Vec<String>, ArtifactStoreError> {
        let mut entries = self.inner.list(None);
        let mut names = Vec::new();

        while let Some(entry) = entries.next().await {
            let meta = entry.map_err(|e| ArtifactStoreError::ListFailed(e.to_string()))?;
            if let Some(name) = meta.location.filename() {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

/// Provider id encoded in a transcript filename, `{stem}_{model_id}.txt`.
fn model_id_of(transcript_filename: &str) -> Option<&str> {
    transcript_filename
        .strip_suffix(".txt")
        .and_then(|stem| stem.rsplit('_').next())
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn write_transcript(
        &self,
        stem: &str,
        model_id: &str,
        transcript: &str,
    ) -> Result<(), ArtifactStoreError> {
        let location = StorePath::from(format!("{stem}_{model_id}.txt"));
        self.inner
            .put(&location, PutPayload::from(transcript.as_bytes().to_vec()))
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    async fn read_transcripts(
        &self,
        stem: &str,
    ) -> Result<Vec<TranscriptArtifact>, ArtifactStoreError> {
        let prefix = format!("{stem}_");
        let mut artifacts = Vec::new();

        for name in self.list_filenames().await? {
            if !name.starts_with(&prefix) || !name.ends_with(".txt") {
                continue;
            }
            let Some(model_id) = model_id_of(&name) else {
                continue;
            };

            let bytes = self.fetch(&name).await?;
            let transcript = String::from_utf8(bytes)
                .map_err(|e| ArtifactStoreError::ReadFailed(format!("{name}: {e}")))?;

            artifacts.push(TranscriptArtifact {
                model_id: model_id.to_string(),
                transcript,
                file_path: self.base_dir.join(&name).display().to_string(),
            });
        }

        Ok(artifacts)
    }

    async fn delete_for_stem(&self, stem: &str) -> Result<Vec<String>, ArtifactStoreError> {
        let names = self.list_filenames().await?;

        let transcript_prefix = format!("{stem}_");
        let transcripts: Vec<&String> = names
            .iter()
            .filter(|n| n.starts_with(&transcript_prefix) && n.ends_with(".txt"))
            .collect();

        if transcripts.is_empty() {
            return Ok(Vec::new());
        }

        let summary_prefix = format!("{stem}_summary.");
        let summaries = names
            .iter()
            .filter(|n| n.starts_with(&summary_prefix) && !n.ends_with(".txt"));

        let mut deleted = Vec::new();
        for name in transcripts.into_iter().chain(summaries) {
            let location = StorePath::from(name.as_str());
            match self.inner.delete(&location).await {
                Ok(()) => deleted.push(name.clone()),
                Err(object_store::Error::NotFound { .. }) => {}
                Err(e) => {
                    tracing::warn!(artifact = %name, error = %e, "Failed to delete artifact");
                }
            }
        }

        Ok(deleted)
    }

    async fn put_report(&self, filename: &str, data: Vec<u8>) -> Result<(), ArtifactStoreError> {
        let location = StorePath::from(filename);
        self.inner
            .put(&location, PutPayload::from(data))
            .await
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    async fn fetch(&self, filename: &str) -> Result<Vec<u8>, ArtifactStoreError> {
        let location = StorePath::from(filename);

        let result = match self.inner.get(&location).await {
            Ok(r) => r,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(ArtifactStoreError::NotFound(filename.to_string()));
            }
            Err(e) => return Err(ArtifactStoreError::ReadFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
