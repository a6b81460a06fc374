use std::path::Path;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use crate::domain::{AudioFormat, sanitize_filename};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub file_path: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Accepts a multipart audio upload and stores it under a timestamped name.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => return bad_request("No file provided"),
            Err(e) => return bad_request(&format!("Malformed upload: {e}")),
        }
    };

    let Some(original_name) = field
        .file_name()
        .map(str::to_string)
        .filter(|name| !name.is_empty())
    else {
        return bad_request("No file selected");
    };

    if AudioFormat::from_path(Path::new(&original_name)).is_none() {
        return bad_request("Invalid file type");
    }

    let sanitized = sanitize_filename(&original_name);
    // Sanitizing can eat the whole name (or its extension) for names made of
    // characters we do not keep.
    if AudioFormat::from_path(Path::new(&sanitized)).is_none() {
        return bad_request("Invalid file type");
    }

    let data = match field.bytes().await {
        Ok(data) => data,
        Err(e) => return bad_request(&format!("Failed to read upload: {e}")),
    };

    let stored_name = format!("{}_{}", Utc::now().format("%Y%m%d_%H%M%S"), sanitized);

    match state.clip_store.store(&stored_name, data).await {
        Ok(()) => {
            tracing::info!(filename = %stored_name, "Audio clip uploaded");
            (
                StatusCode::OK,
                Json(UploadResponse {
                    message: "File uploaded successfully".to_string(),
                    filename: stored_name.clone(),
                    file_path: state.clip_store.clip_path(&stored_name).display().to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store uploaded clip");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to save file: {e}"),
                }),
            )
                .into_response()
        }
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
