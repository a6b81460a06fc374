use std::sync::Arc;

use crate::application::ports::{TranscribeError, Transcriber};
use crate::application::services::TranscriberRegistry;

use super::assemblyai_transcriber::AssemblyAiTranscriber;
use super::candle_whisper_transcriber::CandleWhisperTranscriber;
use super::google_stt_transcriber::GoogleSttTranscriber;
use super::grok_transcriber::GrokTranscriber;
use super::speechmatics_transcriber::SpeechmaticsTranscriber;

/// Everything the factory needs to bring up the provider registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub speechmatics_key: Option<String>,
    pub assemblyai_key: Option<String>,
    pub google_key: Option<String>,
    pub anthropic_key: Option<String>,
    /// BCP-47 primary tag used by most providers.
    pub language: String,
    /// Google wants the full region tag.
    pub google_language: String,
    pub whisper_enabled: bool,
    pub whisper_model: String,
}

pub struct TranscriberRegistryFactory;

impl TranscriberRegistryFactory {
    /// Builds every provider whose configuration is complete. A provider
    /// that fails to initialize is logged and skipped so the rest of the
    /// service still comes up.
    pub fn initialize(config: RegistryConfig) -> TranscriberRegistry {
        let mut transcribers: Vec<Arc<dyn Transcriber>> = Vec::new();

        let builders: [(&str, fn(&RegistryConfig) -> Result<Arc<dyn Transcriber>, TranscribeError>);
            5] = [
            ("speechmatics", Self::build_speechmatics),
            ("google", Self::build_google),
            ("whisper", Self::build_whisper),
            ("grok", Self::build_grok),
            ("assemblyai", Self::build_assemblyai),
        ];

        for (provider, build) in builders {
            match build(&config) {
                Ok(transcriber) => {
                    tracing::info!(provider, "Transcriber initialized");
                    transcribers.push(transcriber);
                }
                Err(e) => {
                    tracing::warn!(provider, error = %e, "Transcriber unavailable, skipping");
                }
            }
        }

        let registry = TranscriberRegistry::from_transcribers(transcribers);
        tracing::info!(providers = ?registry.ids(), "Transcriber registry ready");
        registry
    }

    fn build_speechmatics(
        config: &RegistryConfig,
    ) -> Result<Arc<dyn Transcriber>, TranscribeError> {
        let key = require_key(&config.speechmatics_key, "SPEECHMATICS_API_KEY")?;
        Ok(Arc::new(SpeechmaticsTranscriber::new(
            key,
            config.language.clone(),
        )))
    }

    fn build_google(config: &RegistryConfig) -> Result<Arc<dyn Transcriber>, TranscribeError> {
        let key = require_key(&config.google_key, "GOOGLE_CLOUD_API_KEY")?;
        Ok(Arc::new(GoogleSttTranscriber::new(
            key,
            config.google_language.clone(),
        )?))
    }

    fn build_whisper(config: &RegistryConfig) -> Result<Arc<dyn Transcriber>, TranscribeError> {
        if !config.whisper_enabled {
            return Err(TranscribeError::Unavailable(
                "disabled in configuration".to_string(),
            ));
        }
        Ok(Arc::new(CandleWhisperTranscriber::new(
            &config.whisper_model,
            &config.language,
        )?))
    }

    fn build_grok(config: &RegistryConfig) -> Result<Arc<dyn Transcriber>, TranscribeError> {
        let key = require_key(&config.anthropic_key, "ANTHROPIC_API_KEY")?;
        Ok(Arc::new(GrokTranscriber::new(key)?))
    }

    fn build_assemblyai(config: &RegistryConfig) -> Result<Arc<dyn Transcriber>, TranscribeError> {
        let key = require_key(&config.assemblyai_key, "ASSEMBLYAI_API_KEY")?;
        Ok(Arc::new(AssemblyAiTranscriber::new(
            key,
            config.language.clone(),
        )))
    }
}

fn require_key(key: &Option<String>, variable: &str) -> Result<String, TranscribeError> {
    key.clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| TranscribeError::Unavailable(format!("{variable} is not set")))
}
