use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::multipart;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscribeError, Transcriber, validate_clip};

pub const SPEECHMATICS_ID: &str = "speechmatics";
const SPEECHMATICS_NAME: &str = "Speechmatics";

const DEFAULT_BASE_URL: &str = "https://asr.api.speechmatics.com/v2";
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const POLL_BUDGET: Duration = Duration::from_secs(300);

/// Speechmatics batch API: submit the clip as a job, poll until it reaches a
/// terminal state, then fetch the plain-text transcript.
pub struct SpeechmaticsTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
    poll_interval: Duration,
    poll_budget: Duration,
}

#[derive(Serialize)]
struct JobConfig<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    transcription_config: TranscriptionConfig<'a>,
}

#[derive(Serialize)]
struct TranscriptionConfig<'a> {
    language: &'a str,
    operating_point: &'a str,
}

#[derive(Deserialize)]
struct JobSubmitted {
    id: String,
}

#[derive(Deserialize)]
struct JobStatusResponse {
    job: JobDetails,
}

#[derive(Deserialize)]
struct JobDetails {
    status: String,
}

impl SpeechmaticsTranscriber {
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

    async fn submit_job(&self, clip_path: &Path, mime: &str) -> Result<String, TranscribeError> {
        let data = tokio::fs::read(clip_path)
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("read clip: {e}")))?;

        let filename = clip_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("clip")
            .to_string();

        let config = JobConfig {
            kind: "transcription",
            transcription_config: TranscriptionConfig {
                language: &self.language,
                operating_point: "enhanced",
            },
        };
        let config_json = serde_json::to_string(&config)
            .map_err(|e| TranscribeError::Unexpected(format!("encode job config: {e}")))?;

        let file_part = multipart::Part::bytes(data)
            .file_name(filename)
            .mime_str(mime)
            .map_err(|e| TranscribeError::Unexpected(format!("mime: {e}")))?;

        let form = multipart::Form::new()
            .part("data_file", file_part)
            .text("config", config_json);

        let response = self
            .client
            .post(format!("{}/jobs", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("submit job: {e}")))?;

        if !response.status().is_success() {
            return Err(upstream_failure("job submission", response).await);
        }

        let submitted: JobSubmitted = response
            .json()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("parse job id: {e}")))?;

        Ok(submitted.id)
    }

    async fn poll_status(&self, job_id: &str) -> Result<String, TranscribeError> {
        let response = self
            .client
            .get(format!("{}/jobs/{}", self.base_url, job_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("poll job: {e}")))?;

        if !response.status().is_success() {
            return Err(upstream_failure("job polling", response).await);
        }

        let status: JobStatusResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("parse job status: {e}")))?;

        Ok(status.job.status)
    }

    async fn fetch_transcript(&self, job_id: &str) -> Result<String, TranscribeError> {
        let response = self
            .client
            .get(format!("{}/jobs/{}/transcript", self.base_url, job_id))
            .query(&[("format", "txt")])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("fetch transcript: {e}")))?;

        if !response.status().is_success() {
            return Err(upstream_failure("transcript fetch", response).await);
        }

        let text = response
            .text()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("read transcript: {e}")))?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl Transcriber for SpeechmaticsTranscriber {
    fn id(&self) -> &str {
        SPEECHMATICS_ID
    }

    fn name(&self) -> &str {
        SPEECHMATICS_NAME
    }

    #[tracing::instrument(skip(self))]
    async fn transcribe(&self, clip_path: &Path) -> Result<String, TranscribeError> {
        let format = validate_clip(clip_path)?;

        let job_id = self.submit_job(clip_path, format.mime_type()).await?;
        tracing::debug!(job_id = %job_id, "Speechmatics job submitted");

        let started = Instant::now();

        loop {
            if started.elapsed() >= self.poll_budget {
                return Err(TranscribeError::Timeout(self.poll_budget.as_secs()));
            }

            match self.poll_status(&job_id).await?.as_str() {
                "done" => {
                    let transcript = self.fetch_transcript(&job_id).await?;
                    if transcript.is_empty() {
                        return Err(TranscribeError::EmptyResult);
                    }
                    return Ok(transcript);
                }
                "rejected" => {
                    return Err(TranscribeError::UpstreamRejected(format!(
                        "job {job_id} was rejected"
                    )));
                }
                status => {
                    tracing::debug!(job_id = %job_id, status, "Job still in progress");
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
