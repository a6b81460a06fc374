use std::path::PathBuf;

use config::Environment as EnvironmentSource;
use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

/// Service configuration, layered from `appsettings.{env}` (optional),
/// `APP__`-prefixed environment variables and the conventional provider
/// credential variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            storage: StorageSettings::default(),
            transcription: TranscriptionSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_mb: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding uploaded clips.
    pub audio_dir: PathBuf,
    /// Directory holding transcripts and reports.
    pub results_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            audio_dir: PathBuf::from("audio_clips"),
            results_dir: PathBuf::from("transcriptions"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// BCP-47 primary tag used by most providers.
    pub language: String,
    /// Google wants the full region tag.
    pub google_language: String,
    pub whisper_enabled: bool,
    pub whisper_model: String,
    pub speechmatics_api_key: Option<String>,
    pub assemblyai_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            language: "lv".to_string(),
            google_language: "lv-LV".to_string(),
            whisper_enabled: true,
            whisper_model: "openai/whisper-medium".to_string(),
            speechmatics_api_key: None,
            assemblyai_api_key: None,
            google_api_key: None,
            anthropic_api_key: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json: bool,
}

impl Settings {
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;
        settings.apply_env_credentials();
        Ok(settings)
    }

    /// Provider credentials fall back to their conventional variable names
    /// when the configuration leaves them out.
    fn apply_env_credentials(&mut self) {
        let transcription = &mut self.transcription;
        overlay(
            &mut transcription.speechmatics_api_key,
            "SPEECHMATICS_API_KEY",
        );
        overlay(&mut transcription.assemblyai_api_key, "ASSEMBLYAI_API_KEY");
        overlay(&mut transcription.google_api_key, "GOOGLE_CLOUD_API_KEY");
        overlay(&mut transcription.anthropic_api_key, "ANTHROPIC_API_KEY");
    }
}

fn overlay(slot: &mut Option<String>, variable: &str) {
    if slot.is_some() {
        return;
    }
    if let Ok(value) = std::env::var(variable) {
        if !value.is_empty() {
            *slot = Some(value);
        }
    }
}
