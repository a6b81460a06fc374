use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    bulk_delete_results_handler, delete_file_handler, delete_results_handler, download_handler,
    get_results_handler, health_handler, list_files_handler, list_transcribers_handler,
    transcribe_handler, upload_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.server.max_upload_mb * 1024 * 1024;

    // The static /results/bulk route must sit alongside /results/{filename};
    // axum prefers the static match.
    Router::new()
        .route("/health", get(health_handler))
        .route("/transcribers", get(list_transcribers_handler))
        .route("/upload", post(upload_handler))
        .route("/transcribe", post(transcribe_handler))
        .route("/results/bulk", delete(bulk_delete_results_handler))
        .route(
            "/results/{filename}",
            get(get_results_handler).delete(delete_results_handler),
        )
        .route("/files", get(list_files_handler))
        .route("/files/{filename}", delete(delete_file_handler))
        .route("/download/{filename}", get(download_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
