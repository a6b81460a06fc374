use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscribeError, Transcriber, validate_clip};

pub const ASSEMBLYAI_ID: &str = "assemblyai";
const ASSEMBLYAI_NAME: &str = "AssemblyAI";

const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com/v2";
const POLL_INTERVAL: Duration = Duration::from_secs(3);
const POLL_BUDGET: Duration = Duration::from_secs(300);

/// AssemblyAI: upload the raw clip bytes, create a transcript job against
/// the uploaded URL and poll until it completes or errors.
pub struct AssemblyAiTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
    poll_interval: Duration,
    poll_budget: Duration,
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
    language_code: &'a str,
    speech_model: &'a str,
}

#[derive(Deserialize)]
struct TranscriptCreated {
    id: String,
}

#[derive(Deserialize)]
struct TranscriptStatus {
    status: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl AssemblyAiTranscriber {
    pub fn new(api_key: String, language: String) -> Self {
        Self::with_base_url(api_key, language, DEFAULT_BASE_URL.to_string())
    }

    /// Points the adapter at a different endpoint, used by tests running a
    /// stub upstream.
    pub fn with_base_url(api_key: String, language: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language,
            poll_interval: POLL_INTERVAL,
            poll_budget: POLL_BUDGET,
        }
    }

    /// Shortens the polling cadence, used by tests exercising timeouts.
    pub fn with_poll_config(mut self, interval: Duration, budget: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_budget = budget;
        self
    }

    async fn upload_clip(&self, clip_path: &Path) -> Result<String, TranscribeError> {
        let data = tokio::fs::read(clip_path)
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("read clip: {e}")))?;

        let response = self
            .client
            .post(format!("{}/upload", self.base_url))
            .header("authorization", &self.api_key)
            .body(data)
            .send()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("upload clip: {e}")))?;

        if !response.status().is_success() {
            return Err(upstream_failure("clip upload", response).await);
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("parse upload url: {e}")))?;

        Ok(upload.upload_url)
    }

    async fn create_transcript(&self, audio_url: &str) -> Result<String, TranscribeError> {
        let request = TranscriptRequest {
            audio_url,
            language_code: &self.language,
            speech_model: "best",
        };

        let response = self
            .client
            .post(format!("{}/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("create transcript: {e}")))?;

        if !response.status().is_success() {
            return Err(upstream_failure("transcript creation", response).await);
        }

        let created: TranscriptCreated = response
            .json()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("parse transcript id: {e}")))?;

        Ok(created.id)
    }

    async fn poll_transcript(&self, transcript_id: &str) -> Result<TranscriptStatus, TranscribeError> {
        let response = self
            .client
            .get(format!("{}/transcript/{}", self.base_url, transcript_id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("poll transcript: {e}")))?;

        if !response.status().is_success() {
            return Err(upstream_failure("transcript polling", response).await);
        }

        response
            .json()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("parse transcript status: {e}")))
    }
}

#[async_trait]
impl Transcriber for AssemblyAiTranscriber {
    fn id(&self) -> &str {
        ASSEMBLYAI_ID
    }

    fn name(&self) -> &str {
        ASSEMBLYAI_NAME
    }

    #[tracing::instrument(skip(self))]
    async fn transcribe(&self, clip_path: &Path) -> Result<String, TranscribeError> {
        validate_clip(clip_path)?;

        let audio_url = self.upload_clip(clip_path).await?;
        let transcript_id = self.create_transcript(&audio_url).await?;
        tracing::debug!(transcript_id = %transcript_id, "AssemblyAI transcript created");

        let started = Instant::now();

        loop {
            if started.elapsed() >= self.poll_budget {
                return Err(TranscribeError::Timeout(self.poll_budget.as_secs()));
            }

            let polled = self.poll_transcript(&transcript_id).await?;
            match polled.status.as_str() {
                "completed" => {
                    let transcript = polled.text.unwrap_or_default().trim().to_string();
                    if transcript.is_empty() {
                        return Err(TranscribeError::EmptyResult);
                    }
                    return Ok(transcript);
                }
                "error" => {
                    return Err(TranscribeError::UpstreamRejected(
                        polled.error.unwrap_or_else(|| "unknown error".to_string()),
                    ));
                }
                status => {
                    tracing::debug!(transcript_id = %transcript_id, status, "Transcript still in progress");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

async fn upstream_failure(context: &str, response: reqwest::Response) -> TranscribeError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    TranscribeError::UpstreamRejected(format!("{context} failed with status {status}: {body}"))
}
