use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::TranscriptionServiceError;
use crate::domain::TranscriptionBatch;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct TranscribeRequest {
    pub filename: Option<String>,
    pub models: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub filename: String,
    pub results: Vec<TranscriptionResult>,
    pub summary: Summary,
}

#[derive(Serialize)]
pub struct TranscriptionResult {
    pub model_id: String,
    pub model_name: String,
    pub status: String,
    pub transcript: String,
    pub error: String,
    pub processing_time: f64,
}

#[derive(Serialize)]
pub struct Summary {
    pub total_models: usize,
    pub successful: usize,
    pub failed: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Runs the requested transcribers against a stored clip and returns every
/// per-model outcome plus a success/failure tally.
#[tracing::instrument(skip(state, request))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    Json(request): Json<TranscribeRequest>,
) -> Response {
    let Some(filename) = request.filename.filter(|name| !name.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No filename provided".to_string(),
            }),
        )
            .into_response();
    };

    let Some(_guard) = state.clip_locks.try_acquire(&filename) else {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Another operation is in progress for {filename}"),
            }),
        )
            .into_response();
    };

    match state
        .transcription_service
        .transcribe_clip(&filename, request.models.as_deref())
        .await
    {
        Ok(batch) => (StatusCode::OK, Json(to_response(batch))).into_response(),
        Err(TranscriptionServiceError::ClipNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "File not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Transcription request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {e}"),
                }),
            )
                .into_response()
        }
    }
}

fn to_response(batch: TranscriptionBatch) -> TranscribeResponse {
    TranscribeResponse {
        filename: batch.filename,
        results: batch
            .records
            .into_iter()
            .map(|record| TranscriptionResult {
                model_id: record.model_id,
                model_name: record.model_name,
                status: record.status.as_str().to_string(),
                transcript: record.transcript,
                error: record.error.unwrap_or_default(),
                processing_time: record.processing_time,
            })
            .collect(),
        summary: Summary {
            total_models: batch.summary.total_models,
            successful: batch.summary.successful,
            failed: batch.summary.failed,
        },
    }
}
