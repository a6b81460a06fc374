use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscribeError, Transcriber, validate_clip};

pub const GOOGLE_ID: &str = "google";
const GOOGLE_NAME: &str = "Google Speech-to-Text";

const DEFAULT_BASE_URL: &str = "https://speech.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Google Cloud Speech-to-Text synchronous recognition. The clip is shipped
/// inline, base64-encoded, and the transcript comes back in one response.
pub struct GoogleSttTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    language: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'a str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    enable_automatic_punctuation: bool,
    model: &'a str,
    use_enhanced: bool,
}

#[derive(Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<RecognitionAlternative>,
}

#[derive(Deserialize)]
struct RecognitionAlternative {
    #[serde(default)]
    transcript: String,
}

impl GoogleSttTranscriber {
    pub fn new(api_key: String, language: String) -> Result<Self, TranscribeError> {
        Self::with_base_url(api_key, language, DEFAULT_BASE_URL.to_string())
    }

    /// Points the adapter at a different endpoint, used by tests running a
    /// stub upstream.
    pub fn with_base_url(
        api_key: String,
        language: String,
        base_url: String,
    ) -> Result<Self, TranscribeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TranscribeError::Unavailable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language,
        })
    }
}

#[async_trait]
impl Transcriber for GoogleSttTranscriber {
    fn id(&self) -> &str {
        GOOGLE_ID
    }

    fn name(&self) -> &str {
        GOOGLE_NAME
    }

    #[tracing::instrument(skip(self))]
    async fn transcribe(&self, clip_path: &Path) -> Result<String, TranscribeError> {
        validate_clip(clip_path)?;

        let data = tokio::fs::read(clip_path)
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("read clip: {e}")))?;

        let request = RecognizeRequest {
            config: RecognitionConfig {
                encoding: "ENCODING_UNSPECIFIED",
                sample_rate_hertz: 16_000,
                language_code: &self.language,
                enable_automatic_punctuation: false,
                model: "latest_long",
                use_enhanced: true,
            },
            audio: RecognitionAudio {
                content: BASE64.encode(&data),
            },
        };

        let response = self
            .client
            .post(format!("{}/v1/speech:recognize", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscribeError::Timeout(REQUEST_TIMEOUT.as_secs())
                } else {
                    TranscribeError::Unexpected(format!("recognize request: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::UpstreamRejected(format!(
                "recognition failed with status {status}: {body}"
            )));
        }

        let recognized: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("parse recognition: {e}")))?;

        // Top alternative of each result, stitched in order
        let transcript = recognized
            .results
            .iter()
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if transcript.is_empty() {
            return Err(TranscribeError::EmptyResult);
        }

        Ok(transcript)
    }
}
