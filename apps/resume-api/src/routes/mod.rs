pub mod health;
pub mod resume;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Résumé PDFs above this size are rejected at the framework layer.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume/upload", post(resume::handle_upload))
        .route("/resume/analyze", post(resume::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
