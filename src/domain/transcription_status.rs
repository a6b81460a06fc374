use std::fmt;

/// Lifecycle of a single provider attempt within a transcription batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionStatus {
    Pending,
    Success,
    Error,
}

impl TranscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionStatus::Pending => "pending",
            TranscriptionStatus::Success => "success",
            TranscriptionStatus::Error => "error",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TranscriptionStatus::Pending),
            "success" => Some(TranscriptionStatus::Success),
            "error" => Some(TranscriptionStatus::Error),
            _ => None,
        }
    }
}

impl fmt::Display for TranscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
