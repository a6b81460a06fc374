mod audio_format;
mod stored_clip;
mod transcription_record;
mod transcription_status;

pub use audio_format::AudioFormat;
pub use stored_clip::{StoredClip, clip_stem, is_safe_path_component, sanitize_filename};
pub use transcription_record::{BatchSummary, TranscriptionBatch, TranscriptionRecord};
pub use transcription_status::TranscriptionStatus;
