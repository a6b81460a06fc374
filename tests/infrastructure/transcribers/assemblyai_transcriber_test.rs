use std::path::PathBuf;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::{Value, json};
use tempfile::TempDir;

use balss::application::ports::{TranscribeError, Transcriber};
use balss::infrastructure::transcribers::{ASSEMBLYAI_ID, AssemblyAiTranscriber};

use crate::helpers::spawn_upstream;

fn upstream(status: &'static str, text: Value, error: Value) -> Router {
    Router::new()
        .route(
            "/upload",
            post(|| async { Json(json!({"upload_url": "https://cdn.example/u/1"})) }),
        )
        .route("/transcript", post(|| async { Json(json!({"id": "t-1"})) }))
        .route(
            "/transcript/{id}",
            get(move || async move {
                Json(json!({"status": status, "text": text, "error": error}))
            }),
        )
}

fn adapter(base_url: String) -> AssemblyAiTranscriber {
    AssemblyAiTranscriber::with_base_url("test-key".to_string(), "lv".to_string(), base_url)
        .with_poll_config(Duration::from_millis(10), Duration::from_millis(500))
}

fn temp_clip(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("clip.mp3");
    std::fs::write(&path, b"fake audio bytes").unwrap();
    path
}

#[test]
fn given_adapter_when_asking_identity_then_reports_assemblyai() {
    let adapter = adapter("http://127.0.0.1:9".to_string());

    assert_eq!(adapter.id(), ASSEMBLYAI_ID);
    assert_eq!(adapter.name(), "AssemblyAI");
}

#[tokio::test]
async fn given_completed_transcript_when_transcribing_then_returns_text() {
    let base_url =
        spawn_upstream(upstream("completed", json!(" sveiki, bērni "), Value::Null)).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir);

    let transcript = adapter(base_url).transcribe(&clip).await.unwrap();

    assert_eq!(transcript, "sveiki, bērni");
}

#[tokio::test]
async fn given_errored_transcript_when_transcribing_then_returns_upstream_rejected() {
    let base_url =
        spawn_upstream(upstream("error", Value::Null, json!("audio too short"))).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir);

    let result = adapter(base_url).transcribe(&clip).await;

    assert!(matches!(
        result,
        Err(TranscribeError::UpstreamRejected(message)) if message == "audio too short"
    ));
}

#[tokio::test]
async fn given_transcript_stuck_in_queue_when_transcribing_then_times_out() {
    let base_url = spawn_upstream(upstream("queued", Value::Null, Value::Null)).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir);

    let result = adapter(base_url)
        .with_poll_config(Duration::from_millis(10), Duration::from_millis(50))
        .transcribe(&clip)
        .await;

    assert!(matches!(result, Err(TranscribeError::Timeout(_))));
}

#[tokio::test]
async fn given_completed_transcript_without_text_when_transcribing_then_returns_empty_result() {
    let base_url = spawn_upstream(upstream("completed", Value::Null, Value::Null)).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir);

    let result = adapter(base_url).transcribe(&clip).await;

    assert!(matches!(result, Err(TranscribeError::EmptyResult)));
}

#[tokio::test]
async fn given_missing_clip_when_transcribing_then_returns_invalid_input() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("ghost.mp3");

    let result = adapter("http://127.0.0.1:9".to_string())
        .transcribe(&clip)
        .await;

    assert!(matches!(result, Err(TranscribeError::InvalidInput(_))));
}
