use async_trait::async_trait;
use thiserror::Error;

use crate::domain::TranscriptionRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to render report: {0}")]
    RenderFailed(String),
    #[error("failed to persist report: {0}")]
    PersistFailed(String),
}

/// Names of the report files produced for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPair {
    pub csv_filename: String,
    pub excel_filename: String,
}

/// Renders and persists the provider comparison report for a batch.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn write_batch(
        &self,
        clip_filename: &str,
        records: &[TranscriptionRecord],
    ) -> Result<ReportPair, ReportError>;
}
