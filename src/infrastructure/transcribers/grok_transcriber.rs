use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranscribeError, Transcriber, validate_clip};

pub const GROK_ID: &str = "grok";
const GROK_NAME: &str = "Grok (Anthropic)";

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 4000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

const TRANSCRIPTION_PROMPT: &str = "Please transcribe this audio clip in Latvian. \
    The audio contains children's voices speaking Latvian. Return only the raw \
    transcription text without any formatting, punctuation, or additional \
    commentary. Focus on accuracy of the spoken words.";

/// Transcription through the Anthropic Messages API: the clip goes inline as
/// a base64 content block next to a fixed transcription prompt, and the first
/// text block of the reply is the transcript.
pub struct GrokTranscriber {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock<'a> {
    Text { text: &'a str },
    Audio { source: AudioSource<'a> },
}

#[derive(Serialize)]
struct AudioSource<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    media_type: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}

impl GrokTranscriber {
    pub fn new(api_key: String) -> Result<Self, TranscribeError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Points the adapter at a different endpoint, used by tests running a
    /// stub upstream.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, TranscribeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TranscribeError::Unavailable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transcriber for GrokTranscriber {
    fn id(&self) -> &str {
        GROK_ID
    }

    fn name(&self) -> &str {
        GROK_NAME
    }

    #[tracing::instrument(skip(self))]
    async fn transcribe(&self, clip_path: &Path) -> Result<String, TranscribeError> {
        let format = validate_clip(clip_path)?;

        let data = tokio::fs::read(clip_path)
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("read clip: {e}")))?;

        let request = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Text {
                        text: TRANSCRIPTION_PROMPT,
                    },
                    ContentBlock::Audio {
                        source: AudioSource {
                            kind: "base64",
                            media_type: format.mime_type(),
                            data: BASE64.encode(&data),
                        },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscribeError::Timeout(REQUEST_TIMEOUT.as_secs())
                } else {
                    TranscribeError::Unexpected(format!("messages request: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::UpstreamRejected(format!(
                "message request failed with status {status}: {body}"
            )));
        }

        let reply: MessagesResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("parse reply: {e}")))?;

        let transcript = reply
            .content
            .first()
            .and_then(|block| block.text.as_deref())
            .unwrap_or("")
            .trim()
            .to_string();

        if transcript.is_empty() {
            return Err(TranscribeError::EmptyResult);
        }

        Ok(transcript)
    }
}
