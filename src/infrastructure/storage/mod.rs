mod local_artifact_store;
mod local_clip_store;

pub use local_artifact_store::LocalArtifactStore;
pub use local_clip_store::LocalClipStore;
