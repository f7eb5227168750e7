pub mod health;
pub mod search;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/search/profiles", post(search::handle_search))
        .route("/search/history", get(search::handle_history))
        .with_state(state)
}
