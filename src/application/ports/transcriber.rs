use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::AudioFormat;

/// Failure modes shared by every transcription provider.
#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("provider rejected the job: {0}")]
    UpstreamRejected(String),
    #[error("provider returned no transcription text")]
    EmptyResult,
    #[error("transcription timed out after {0} seconds")]
    Timeout(u64),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Unexpected(String),
}

/// A speech-to-text provider capable of transcribing one stored clip.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Stable identifier clients use to select this provider.
    fn id(&self) -> &str;

    /// Human-readable name shown in listings and reports.
    fn name(&self) -> &str;

    async fn transcribe(&self, clip_path: &Path) -> Result<String, TranscribeError>;
}

/// Checks that a clip exists and carries a supported extension before any
/// provider work starts.
pub fn validate_clip(clip_path: &Path) -> Result<AudioFormat, TranscribeError> {
    if !clip_path.is_file() {
        return Err(TranscribeError::InvalidInput(format!(
            "audio file not found: {}",
            clip_path.display()
        )));
    }

    AudioFormat::from_path(clip_path).ok_or_else(|| {
        TranscribeError::InvalidInput(format!(
            "unsupported audio format: {}",
            clip_path.display()
        ))
    })
}
