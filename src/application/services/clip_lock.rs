use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Advisory per-filename locks serializing mutating operations on a clip.
///
/// Transcription and deletion of the same clip must not overlap, so each
/// takes the lock for the clip's filename up front and bails out with a
/// conflict when it is already held.
#[derive(Clone, Default)]
pub struct ClipLockMap {
    held: Arc<Mutex<HashSet<String>>>,
}

impl ClipLockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for `filename`, or `None` when another operation
    /// already holds it. The lock releases when the guard drops.
    pub fn try_acquire(&self, filename: &str) -> Option<ClipLockGuard> {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);

        if !held.insert(filename.to_string()) {
            return None;
        }

        Some(ClipLockGuard {
            held: Arc::clone(&self.held),
            filename: filename.to_string(),
        })
    }
}

pub struct ClipLockGuard {
    held: Arc<Mutex<HashSet<String>>>,
    filename: String,
}

impl Drop for ClipLockGuard {
    fn drop(&mut self) {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.filename);
    }
}
