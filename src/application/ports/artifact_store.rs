use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactStoreError {
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("failed to write artifact: {0}")]
    WriteFailed(String),
    #[error("failed to read artifact: {0}")]
    ReadFailed(String),
    #[error("failed to list artifacts: {0}")]
    ListFailed(String),
    #[error("failed to delete artifact: {0}")]
    DeleteFailed(String),
}

/// One provider's saved transcript for one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptArtifact {
    pub model_id: String,
    pub transcript: String,
    pub file_path: String,
}

/// Storage for per-provider transcripts and batch report files.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Writes `{stem}_{model_id}.txt` containing the transcript.
    async fn write_transcript(
        &self,
        stem: &str,
        model_id: &str,
        transcript: &str,
    ) -> Result<(), ArtifactStoreError>;

    async fn read_transcripts(&self, stem: &str)
    -> Result<Vec<TranscriptArtifact>, ArtifactStoreError>;

    /// Deletes the transcript and summary artifacts belonging to one clip
    /// stem. Returns the deleted filenames, empty when no transcripts were
    /// found.
    async fn delete_for_stem(&self, stem: &str) -> Result<Vec<String>, ArtifactStoreError>;

    async fn put_report(&self, filename: &str, data: Vec<u8>) -> Result<(), ArtifactStoreError>;

    async fn fetch(&self, filename: &str) -> Result<Vec<u8>, ArtifactStoreError>;
}
