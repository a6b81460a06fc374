use std::path::PathBuf;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};
use tempfile::TempDir;

use balss::application::ports::{TranscribeError, Transcriber};
use balss::infrastructure::transcribers::{GOOGLE_ID, GoogleSttTranscriber};

use crate::helpers::spawn_upstream;

fn upstream(body: Value) -> Router {
    Router::new().route(
        "/v1/speech:recognize",
        post(move || async move { Json(body) }),
    )
}

fn adapter(base_url: String) -> GoogleSttTranscriber {
    GoogleSttTranscriber::with_base_url("test-key".to_string(), "lv-LV".to_string(), base_url)
        .unwrap()
}

fn temp_clip(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("clip.flac");
    std::fs::write(&path, b"fake audio bytes").unwrap();
    path
}

#[test]
fn given_adapter_when_asking_identity_then_reports_google() {
    let adapter = adapter("http://127.0.0.1:9".to_string());

    assert_eq!(adapter.id(), GOOGLE_ID);
    assert_eq!(adapter.name(), "Google Speech-to-Text");
}

#[tokio::test]
async fn given_recognition_results_when_transcribing_then_top_alternatives_are_joined() {
    let base_url = spawn_upstream(upstream(json!({
        "results": [
            {"alternatives": [{"transcript": "sveiki"}, {"transcript": "sveiks"}]},
            {"alternatives": [{"transcript": "bērni"}]}
        ]
    })))
    .await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir);

    let transcript = adapter(base_url).transcribe(&clip).await.unwrap();

    assert_eq!(transcript, "sveiki bērni");
}

#[tokio::test]
async fn given_no_recognition_results_when_transcribing_then_returns_empty_result() {
    let base_url = spawn_upstream(upstream(json!({"results": []}))).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir);

    let result = adapter(base_url).transcribe(&clip).await;

    assert!(matches!(result, Err(TranscribeError::EmptyResult)));
}

#[tokio::test]
async fn given_upstream_denies_request_when_transcribing_then_returns_upstream_rejected() {
    let router = Router::new().route(
        "/v1/speech:recognize",
        post(|| async { (StatusCode::FORBIDDEN, "API key invalid") }),
    );
    let base_url = spawn_upstream(router).await;
    let dir = TempDir::new().unwrap();
    let clip = temp_clip(&dir);

    let result = adapter(base_url).transcribe(&clip).await;

    assert!(matches!(
        result,
        Err(TranscribeError::UpstreamRejected(message)) if message.contains("403")
    ));
}

#[tokio::test]
async fn given_missing_clip_when_transcribing_then_returns_invalid_input() {
    let dir = TempDir::new().unwrap();
    let clip = dir.path().join("ghost.flac");

    let result = adapter("http://127.0.0.1:9".to_string())
        .transcribe(&clip)
        .await;

    assert!(matches!(result, Err(TranscribeError::InvalidInput(_))));
}
