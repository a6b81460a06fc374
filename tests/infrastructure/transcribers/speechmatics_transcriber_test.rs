use std::path::PathBuf;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::json;
use tempfile::TempDir;

use balss::application::ports::{TranscribeError, Transcriber};
use balss::infrastructure::transcribers::{SPEECHMATICS_ID, SpeechmaticsTranscriber};

use crate::helpers::spawn_upstream;

fn upstream(job_status: &'static str, transcript: &'static str) -> Router {
    Router::new()
        .route("/jobs", post(|| async { Json(json!({"id": "job-1"})) }))
        .route(
            "/jobs/{job_id}",
            get(move || async move { Json(json!({"job": {"status": job_status}})) }),
        )
        .route(
            "/jobs/{job_id}/transcript",
            get(move || async move { transcript }),
        )
}

fn adapter(base_url: String) -> SpeechmaticsTranscriber {
    SpeechmaticsTranscriber::with_base_url("test-key".to_string(), "lv".to_string(), base_url)
        .with_poll_config(Duration::from_millis(10), Duration::from_millis(500))
}

fn temp_clip(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"fake audio bytes").unwrap();
    path
}

#[test]
fn given_adapter_when_asking_identity_then_reports_speechmatics() {
    let adapter = adapter("http://127.0.0.1:9".to_string());

    assert_eq!(adapter.id(), SPEECHMATICS_ID);
    assert_eq!(adapter.name(), "Speechmatics");
}

#[tokio::test]
async fn given_job_completes_when_transcribing_then_returns_transcript() {
    let base_url = spawn_upstream(upstream("done", "sveiki bērni\n")).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir, "clip.wav");

    let transcript = adapter(base_url).transcribe(&clip).await.unwrap();

    assert_eq!(transcript, "sveiki bērni");
}

#[tokio::test]
async fn given_job_rejected_when_transcribing_then_returns_upstream_rejected() {
    let base_url = spawn_upstream(upstream("rejected", "")).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir, "clip.wav");

    let result = adapter(base_url).transcribe(&clip).await;

    assert!(matches!(
        result,
        Err(TranscribeError::UpstreamRejected(message)) if message.contains("rejected")
    ));
}

#[tokio::test]
async fn given_job_never_finishes_when_transcribing_then_times_out() {
    let base_url = spawn_upstream(upstream("running", "")).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir, "clip.wav");

    let result = adapter(base_url)
        .with_poll_config(Duration::from_millis(10), Duration::from_millis(50))
        .transcribe(&clip)
        .await;

    assert!(matches!(result, Err(TranscribeError::Timeout(_))));
}

#[tokio::test]
async fn given_done_job_with_blank_transcript_when_transcribing_then_returns_empty_result() {
    let base_url = spawn_upstream(upstream("done", "  \n")).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir, "clip.wav");

    let result = adapter(base_url).transcribe(&clip).await;

    assert!(matches!(result, Err(TranscribeError::EmptyResult)));
}

#[tokio::test]
async fn given_missing_clip_when_transcribing_then_returns_invalid_input() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("ghost.wav");

    let result = adapter("http://127.0.0.1:9".to_string())
        .transcribe(&clip)
        .await;

    assert!(matches!(result, Err(TranscribeError::InvalidInput(_))));
}

#[tokio::test]
async fn given_unsupported_extension_when_transcribing_then_returns_invalid_input() {
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir, "notes.txt");

    let result = adapter("http://127.0.0.1:9".to_string())
        .transcribe(&clip)
        .await;

    assert!(matches!(result, Err(TranscribeError::InvalidInput(_))));
}
