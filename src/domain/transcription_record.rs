use super::transcription_status::TranscriptionStatus;

/// Outcome of one provider's attempt at one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionRecord {
    pub model_id: String,
    pub model_name: String,
    pub status: TranscriptionStatus,
    pub transcript: String,
    pub error: Option<String>,
    pub processing_time: f64,
}

impl TranscriptionRecord {
    pub fn pending(model_id: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            model_name: model_name.into(),
            status: TranscriptionStatus::Pending,
            transcript: String::new(),
            error: None,
            processing_time: 0.0,
        }
    }

    pub fn complete(&mut self, transcript: String, processing_time: f64) {
        self.status = TranscriptionStatus::Success;
        self.transcript = transcript;
        self.error = None;
        self.processing_time = processing_time;
    }

    pub fn fail(&mut self, error: String, processing_time: f64) {
        self.status = TranscriptionStatus::Error;
        self.error = Some(error);
        self.processing_time = processing_time;
    }

    pub fn is_success(&self) -> bool {
        self.status == TranscriptionStatus::Success
    }
}

/// Per-batch counts shown to the client next to the individual results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total_models: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[TranscriptionRecord]) -> Self {
        let successful = records.iter().filter(|r| r.is_success()).count();
        Self {
            total_models: records.len(),
            successful,
            failed: records.len() - successful,
        }
    }
}

/// Everything produced by running a clip through the selected providers.
#[derive(Debug, Clone)]
pub struct TranscriptionBatch {
    pub filename: String,
    pub records: Vec<TranscriptionRecord>,
    pub summary: BatchSummary,
}

impl TranscriptionBatch {
    pub fn new(filename: impl Into<String>, records: Vec<TranscriptionRecord>) -> Self {
        let summary = BatchSummary::from_records(&records);
        Self {
            filename: filename.into(),
            records,
            summary,
        }
    }
}
