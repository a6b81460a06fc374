use std::sync::Arc;

use crate::application::ports::{ArtifactStore, ClipStore};
use crate::application::services::{ClipLockMap, TranscriberRegistry, TranscriptionService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TranscriberRegistry>,
    pub transcription_service: Arc<TranscriptionService>,
    pub clip_store: Arc<dyn ClipStore>,
    pub artifact_store: Arc<dyn ArtifactStore>,
    pub clip_locks: ClipLockMap,
    pub settings: Settings,
}
