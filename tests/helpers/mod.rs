use std::path::Path;

use async_trait::async_trait;
use axum::Router;
use tokio::net::TcpListener;

use balss::application::ports::{TranscribeError, Transcriber};

/// Transcriber double that always yields the same transcript.
pub struct StaticTranscriber {
    pub id: &'static str,
    pub name: &'static str,
    pub transcript: &'static str,
}

#[async_trait]
impl Transcriber for StaticTranscriber {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    async fn transcribe(&self, _clip_path: &Path) -> Result<String, TranscribeError> {
        Ok(self.transcript.to_string())
    }
}

/// Transcriber double that always fails as if the upstream were down.
pub struct FailingTranscriber {
    pub id: &'static str,
    pub name: &'static str,
}

#[async_trait]
impl Transcriber for FailingTranscriber {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    async fn transcribe(&self, _clip_path: &Path) -> Result<String, TranscribeError> {
        Err(TranscribeError::Unavailable("simulated outage".to_string()))
    }
}

/// Minimal PCM WAV container around raw interleaved samples.
pub fn build_wav(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
    let data_size = samples.len() as u32 * 2;
    let block_align = channels * 2;
    let byte_rate = sample_rate * u32::from(block_align);
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

/// Binds a throwaway HTTP server so adapter tests can talk to a fake
/// upstream over a real socket.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
