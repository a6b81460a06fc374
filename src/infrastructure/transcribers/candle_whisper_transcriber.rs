use std::path::Path;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{TranscribeError, Transcriber, validate_clip};

use super::audio_decoder::decode_to_mono_pcm;

pub const WHISPER_ID: &str = "whisper";
const WHISPER_NAME: &str = "OpenAI Whisper";

// Mel filter banks are published separately from the model weights.
const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";

const MAX_DECODE_TOKENS: usize = 224;

/// Local Whisper inference on Candle.
///
/// The model stays resident behind a mutex, so clips are decoded one at a
/// time. Decoding is greedy with the target language token forced into the
/// prompt, which keeps short Latvian clips from being misdetected.
pub struct CandleWhisperTranscriber {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    dtype: DType,
    mel_filters: Vec<f32>,
    language_token: u32,
}

impl CandleWhisperTranscriber {
    pub fn new(model_id: &str, language: &str) -> Result<Self, TranscribeError> {
        let device = Device::cuda_if_available(0)
            .map_err(|e| TranscribeError::Unavailable(format!("device: {e}")))?;
        let dtype = Self::select_dtype(&device);

        tracing::info!(device = ?device, model = model_id, language, "Loading Whisper model");

        let api = Api::new().map_err(|e| load_error(format!("hub api: {e}")))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| load_error(format!("config.json: {e}")))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_error(format!("tokenizer.json: {e}")))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| load_error(format!("model.safetensors: {e}")))?;

        let mel_repo = api.repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model));
        let mel_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| load_error(format!("melfilters.bytes: {e}")))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| load_error(format!("read config: {e}")))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| load_error(format!("parse config: {e}")))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| load_error(format!("tokenizer: {e}")))?;

        let language_token = tokenizer
            .token_to_id(&format!("<|{language}|>"))
            .ok_or_else(|| load_error(format!("no language token for '{language}'")))?;

        let mel_bytes = std::fs::read(&mel_path)
            .map_err(|e| load_error(format!("mel filters: {e}")))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| load_error(format!("weights: {e}")))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| load_error(format!("model: {e}")))?;

        tracing::info!("Whisper model loaded");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            dtype,
            mel_filters,
            language_token,
        })
    }

    pub fn select_dtype(device: &Device) -> DType {
        if device.is_cuda() {
            DType::F16
        } else {
            DType::F32
        }
    }

    fn decode_window(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
    ) -> Result<String, TranscribeError> {
        let sot = self.token_id(m::SOT_TOKEN)?;
        let transcribe = self.token_id(m::TRANSCRIBE_TOKEN)?;
        let no_timestamps = self.token_id(m::NO_TIMESTAMPS_TOKEN)?;
        let eot = self.token_id(m::EOT_TOKEN)?;

        let audio_features = model
            .encoder
            .forward(mel, true)
            .map_err(|e| inference_error(format!("encoder: {e}")))?;

        let mut tokens = vec![sot, self.language_token, transcribe, no_timestamps];
        let prompt_len = tokens.len();
        let mut text = String::new();

        for _ in 0..MAX_DECODE_TOKENS {
            let input = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(|e| inference_error(e.to_string()))?;

            let decoded = model
                .decoder
                .forward(&input, &audio_features, tokens.len() == prompt_len)
                .map_err(|e| inference_error(format!("decoder: {e}")))?;

            let logits = decoded
                .squeeze(0)
                .and_then(|d| model.decoder.final_linear(&d))
                .map_err(|e| inference_error(format!("linear: {e}")))?;

            let seq_len = logits.dim(0).map_err(|e| inference_error(e.to_string()))?;
            let next = logits
                .get(seq_len - 1)
                .and_then(|l| l.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(|e| inference_error(e.to_string()))?;

            if next == eot {
                break;
            }

            tokens.push(next);

            if let Some(piece) = self.tokenizer.id_to_token(next) {
                text.push_str(&piece.replace('Ġ', " ").replace('▁', " "));
            }
        }

        model.reset_kv_cache();

        Ok(text.trim().to_string())
    }

    fn token_id(&self, token: &str) -> Result<u32, TranscribeError> {
        self.tokenizer
            .token_to_id(token)
            .ok_or_else(|| inference_error(format!("token not found: {token}")))
    }
}

#[async_trait]
impl Transcriber for CandleWhisperTranscriber {
    fn id(&self) -> &str {
        WHISPER_ID
    }

    fn name(&self) -> &str {
        WHISPER_NAME
    }

    async fn transcribe(&self, clip_path: &Path) -> Result<String, TranscribeError> {
        let format = validate_clip(clip_path)?;

        let data = tokio::fs::read(clip_path)
            .await
            .map_err(|e| TranscribeError::Unexpected(format!("read clip: {e}")))?;

        let pcm = decode_to_mono_pcm(&data, Some(format.extension()))?;

        let mut mel_windows = Vec::new();
        for window in pcm.chunks(m::N_SAMPLES) {
            let mut samples = window.to_vec();
            samples.resize(m::N_SAMPLES, 0.0);

            let mel = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let frames = mel.len() / self.config.num_mel_bins;

            let tensor = Tensor::from_vec(mel, (1, self.config.num_mel_bins, frames), &self.device)
                .and_then(|t| t.to_dtype(self.dtype))
                .map_err(|e| inference_error(format!("mel tensor: {e}")))?;

            mel_windows.push(tensor);
        }

        let mut model = self.model.lock().await;
        let mut segments: Vec<String> = Vec::new();

        for (i, mel) in mel_windows.iter().enumerate() {
            tracing::debug!(window = i, "Decoding audio window");
            let text = self.decode_window(&mut model, mel)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        drop(model);

        let transcript = segments.join(" ").trim().to_string();

        tracing::info!(
            windows = segments.len(),
            chars = transcript.len(),
            "Whisper transcription finished"
        );

        if transcript.is_empty() {
            return Err(TranscribeError::EmptyResult);
        }

        Ok(transcript)
    }
}

fn load_error(detail: impl Into<String>) -> TranscribeError {
    TranscribeError::Unavailable(format!("whisper model load failed: {}", detail.into()))
}

fn inference_error(detail: impl Into<String>) -> TranscribeError {
    TranscribeError::Unexpected(format!("whisper inference failed: {}", detail.into()))
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscribeError> {
    let expected = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected * 4 {
        return Err(load_error(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
