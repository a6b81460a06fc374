mod artifact_store;
mod clip_store;
mod report_writer;
mod transcriber;

pub use artifact_store::{ArtifactStore, ArtifactStoreError, TranscriptArtifact};
pub use clip_store::{ClipStore, ClipStoreError};
pub use report_writer::{ReportError, ReportPair, ReportWriter};
pub use transcriber::{TranscribeError, Transcriber, validate_clip};
