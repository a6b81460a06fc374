use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{clip_stem, is_safe_path_component};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct FilesResponse {
    pub files: Vec<FileEntry>,
}

#[derive(Serialize)]
pub struct FileEntry {
    pub filename: String,
    pub size: u64,
    pub upload_time: String,
}

#[derive(Serialize)]
pub struct DeleteFileResponse {
    pub message: String,
    pub deleted_files: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Lists the uploaded audio clips with size and upload time.
#[tracing::instrument(skip(state))]
pub async fn list_files_handler(State(state): State<AppState>) -> Response {
    match state.clip_store.list().await {
        Ok(clips) => (
            StatusCode::OK,
            Json(FilesResponse {
                files: clips
                    .into_iter()
                    .map(|clip| FileEntry {
                        filename: clip.filename,
                        size: clip.size_bytes,
                        upload_time: clip.uploaded_at.to_rfc3339(),
                    })
                    .collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list audio clips");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Deletes an audio clip together with all of its transcription artifacts.
#[tracing::instrument(skip(state))]
pub async fn delete_file_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    if !is_safe_path_component(&filename) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid filename".to_string(),
            }),
        )
            .into_response();
    }

    let Some(_guard) = state.clip_locks.try_acquire(&filename) else {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: format!("Another operation is in progress for {filename}"),
            }),
        )
            .into_response();
    };

    let mut deleted_files = Vec::new();

    match state.clip_store.delete(&filename).await {
        Ok(true) => {
            tracing::info!(filename = %filename, "Deleted audio clip");
            deleted_files.push(format!("audio:{filename}"));
        }
        Ok(false) => {}
        Err(e) => {
            tracing::error!(filename = %filename, error = %e, "Failed to delete audio clip");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    }

    match state.artifact_store.delete_for_stem(clip_stem(&filename)).await {
        Ok(deleted) => deleted_files.extend(deleted),
        Err(e) => {
            tracing::error!(filename = %filename, error = %e, "Failed to delete result files");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    }

    (
        StatusCode::OK,
        Json(DeleteFileResponse {
            message: format!("Deleted {} files", deleted_files.len()),
            deleted_files,
        }),
    )
        .into_response()
}
