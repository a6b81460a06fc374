use std::sync::Arc;

use crate::application::ports::Transcriber;

/// Ordered collection of the providers that initialized successfully at
/// startup. Lookup is by provider id, iteration preserves insertion order.
pub struct TranscriberRegistry {
    entries: Vec<Arc<dyn Transcriber>>,
}

impl TranscriberRegistry {
    pub fn from_transcribers(transcribers: Vec<Arc<dyn Transcriber>>) -> Self {
        let mut entries: Vec<Arc<dyn Transcriber>> = Vec::with_capacity(transcribers.len());

        for transcriber in transcribers {
            if entries.iter().any(|e| e.id() == transcriber.id()) {
                tracing::warn!(
                    provider = transcriber.id(),
                    "Duplicate provider id, keeping the first registration"
                );
                continue;
            }
            entries.push(transcriber);
        }

        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Transcriber>> {
        self.entries.iter().find(|t| t.id() == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|t| t.id().to_string()).collect()
    }

    pub fn entries(&self) -> &[Arc<dyn Transcriber>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
