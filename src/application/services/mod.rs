mod clip_lock;
mod transcriber_registry;
mod transcription_service;

pub use clip_lock::{ClipLockGuard, ClipLockMap};
pub use transcriber_registry::TranscriberRegistry;
pub use transcription_service::{TranscriptionService, TranscriptionServiceError};
