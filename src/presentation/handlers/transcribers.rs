use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribersResponse {
    pub transcribers: Vec<TranscriberInfo>,
}

#[derive(Serialize)]
pub struct TranscriberInfo {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// Lists every transcriber that initialized successfully.
pub async fn list_transcribers_handler(State(state): State<AppState>) -> impl IntoResponse {
    let transcribers = state
        .registry
        .entries()
        .iter()
        .map(|transcriber| TranscriberInfo {
            id: transcriber.id().to_string(),
            name: transcriber.name().to_string(),
            status: "available".to_string(),
        })
        .collect();

    (StatusCode::OK, Json(TranscribersResponse { transcribers }))
}
