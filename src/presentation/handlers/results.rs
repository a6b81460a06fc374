use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{clip_stem, is_safe_path_component};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ResultsResponse {
    pub filename: String,
    pub results: Vec<ResultEntry>,
}

#[derive(Serialize)]
pub struct ResultEntry {
    pub model_id: String,
    pub transcript: String,
    pub file_path: String,
}

#[derive(Serialize)]
pub struct DeleteResultsResponse {
    pub message: String,
    pub deleted_files: Vec<String>,
}

#[derive(Deserialize)]
pub struct BulkDeleteRequest {
    pub filenames: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Returns every persisted per-model transcript for one clip.
#[tracing::instrument(skip(state))]
pub async fn get_results_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    if !is_safe_path_component(&filename) {
        return invalid_filename();
    }

    match state.artifact_store.read_transcripts(clip_stem(&filename)).await {
        Ok(artifacts) if artifacts.is_empty() => not_found("No results found"),
        Ok(artifacts) => (
            StatusCode::OK,
            Json(ResultsResponse {
                filename,
                results: artifacts
                    .into_iter()
                    .map(|artifact| ResultEntry {
                        model_id: artifact.model_id,
                        transcript: artifact.transcript,
                        file_path: artifact.file_path,
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read transcription results");
            internal_error(&e.to_string())
        }
    }
}

/// Deletes every transcript and summary artifact belonging to one clip.
#[tracing::instrument(skip(state))]
pub async fn delete_results_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    if !is_safe_path_component(&filename) {
        return invalid_filename();
    }

    let Some(_guard) = state.clip_locks.try_acquire(&filename) else {
        return busy(&filename);
    };

    match state.artifact_store.delete_for_stem(clip_stem(&filename)).await {
        Ok(deleted) if deleted.is_empty() => not_found("No results found"),
        Ok(deleted) => (
            StatusCode::OK,
            Json(DeleteResultsResponse {
                message: format!("Deleted {} files", deleted.len()),
                deleted_files: deleted,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete transcription results");
            internal_error(&e.to_string())
        }
    }
}

/// Deletes results for many clips at once, collecting per-clip failures
/// instead of aborting the batch.
#[tracing::instrument(skip(state, request))]
pub async fn bulk_delete_results_handler(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> Response {
    let filenames = request.filenames.unwrap_or_default();
    if filenames.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No filenames provided".to_string(),
            }),
        )
            .into_response();
    }

    let mut deleted_files = Vec::new();
    let mut errors = Vec::new();

    for filename in &filenames {
        if !is_safe_path_component(filename) {
            errors.push(format!("{filename}: invalid filename"));
            continue;
        }

        let Some(_guard) = state.clip_locks.try_acquire(filename) else {
            errors.push(format!("{filename}: another operation is in progress"));
            continue;
        };

        match state.artifact_store.delete_for_stem(clip_stem(filename)).await {
            Ok(deleted) => {
                if !deleted.is_empty() {
                    tracing::info!(
                        filename = %filename,
                        count = deleted.len(),
                        "Deleted result files"
                    );
                }
                deleted_files.extend(deleted);
            }
            Err(e) => {
                tracing::error!(filename = %filename, error = %e, "Bulk delete failed");
                errors.push(format!("{filename}: {e}"));
            }
        }
    }

    let status = if errors.is_empty() {
        StatusCode::OK
    } else if deleted_files.is_empty() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::MULTI_STATUS
    };

    (
        status,
        Json(BulkDeleteResponse {
            message: format!("Deleted {} files", deleted_files.len()),
            deleted_files,
            errors,
        }),
    )
        .into_response()
}

fn invalid_filename() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid filename".to_string(),
        }),
    )
        .into_response()
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn busy(filename: &str) -> Response {
    (
        StatusCode::CONFLICT,
        Json(ErrorResponse {
            error: format!("Another operation is in progress for {filename}"),
        }),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
