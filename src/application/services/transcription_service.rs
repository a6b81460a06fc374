use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::application::ports::{ArtifactStore, ClipStore, ClipStoreError, ReportError, ReportWriter};
use crate::application::services::TranscriberRegistry;
use crate::domain::{TranscriptionBatch, TranscriptionRecord, clip_stem};

#[derive(Debug, Error)]
pub enum TranscriptionServiceError {
    #[error("audio file not found: {0}")]
    ClipNotFound(String),
    #[error(transparent)]
    ClipStore(#[from] ClipStoreError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Runs one clip through the selected providers, persists each transcript
/// artifact and writes the comparison report for the batch.
pub struct TranscriptionService {
    registry: Arc<TranscriberRegistry>,
    clips: Arc<dyn ClipStore>,
    artifacts: Arc<dyn ArtifactStore>,
    reports: Arc<dyn ReportWriter>,
}

impl TranscriptionService {
    pub fn new(
        registry: Arc<TranscriberRegistry>,
        clips: Arc<dyn ClipStore>,
        artifacts: Arc<dyn ArtifactStore>,
        reports: Arc<dyn ReportWriter>,
    ) -> Self {
        Self {
            registry,
            clips,
            artifacts,
            reports,
        }
    }

    /// Transcribes `filename` with the selected providers, or with every
    /// registered provider when no selection is given. Selected ids without
    /// a registered provider are skipped. Providers run sequentially so a
    /// slow upstream never competes with the local model for the clip.
    #[tracing::instrument(skip(self, selected_models))]
    pub async fn transcribe_clip(
        &self,
        filename: &str,
        selected_models: Option<&[String]>,
    ) -> Result<TranscriptionBatch, TranscriptionServiceError> {
        if !self.clips.exists(filename).await? {
            return Err(TranscriptionServiceError::ClipNotFound(filename.to_string()));
        }

        let clip_path = self.clips.clip_path(filename);
        let stem = clip_stem(filename).to_string();

        let model_ids: Vec<String> = match selected_models {
            Some(ids) => ids.to_vec(),
            None => self.registry.ids(),
        };

        let mut records: Vec<TranscriptionRecord> = Vec::with_capacity(model_ids.len());

        for model_id in &model_ids {
            let Some(transcriber) = self.registry.get(model_id) else {
                tracing::warn!(model_id = %model_id, "Unknown transcriber requested, skipping");
                continue;
            };

            let mut record = TranscriptionRecord::pending(transcriber.id(), transcriber.name());
            let started = Instant::now();

            match transcriber.transcribe(&clip_path).await {
                Ok(transcript) => {
                    let elapsed = started.elapsed().as_secs_f64();
                    tracing::info!(
                        model_id = %model_id,
                        chars = transcript.len(),
                        elapsed_secs = elapsed,
                        "Transcription succeeded"
                    );

                    match self
                        .artifacts
                        .write_transcript(&stem, transcriber.id(), &transcript)
                        .await
                    {
                        Ok(()) => record.complete(transcript, elapsed),
                        Err(e) => {
                            tracing::error!(model_id = %model_id, error = %e, "Failed to persist transcript");
                            // Keep the text for the response, but an entry
                            // without its artifact counts as failed.
                            record.transcript = transcript;
                            record.fail(format!("transcript could not be persisted: {e}"), elapsed);
                        }
                    }
                }
                Err(e) => {
                    let elapsed = started.elapsed().as_secs_f64();
                    tracing::warn!(
                        model_id = %model_id,
                        error = %e,
                        elapsed_secs = elapsed,
                        "Transcription failed"
                    );
                    record.fail(e.to_string(), elapsed);
                }
            }

            records.push(record);
        }

        let batch = TranscriptionBatch::new(filename, records);

        let report = self.reports.write_batch(filename, &batch.records).await?;
        tracing::info!(
            csv = %report.csv_filename,
            excel = %report.excel_filename,
            successful = batch.summary.successful,
            failed = batch.summary.failed,
            "Batch report written"
        );

        Ok(batch)
    }
}
