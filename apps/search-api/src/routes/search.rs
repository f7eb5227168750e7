use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::aggregator::aggregate;
use crate::errors::AppError;
use crate::models::history::HistoryResponse;
use crate::models::search::{SearchRequest, SearchResponse};
use crate::state::AppState;

const QUERY_MIN_CHARS: usize = 3;
const QUERY_MAX_CHARS: usize = 500;

/// POST /search/profiles
///
/// Enhances the query when an LLM is configured (best-effort), runs the
/// provider search, and parses the raw batch into structured profiles.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query_chars = req.query.chars().count();
    if !(QUERY_MIN_CHARS..=QUERY_MAX_CHARS).contains(&query_chars) {
        return Err(AppError::Validation(format!(
            "query must be between {QUERY_MIN_CHARS} and {QUERY_MAX_CHARS} characters"
        )));
    }
    if !(1..=50).contains(&req.limit) {
        return Err(AppError::Validation(
            "limit must be between 1 and 50".to_string(),
        ));
    }

    let started = Instant::now();
    let category = req.category.as_str();

    let query = match &state.llm {
        Some(llm) => llm.enhance_query(&req.query, category, req.limit).await,
        None => req.query.clone(),
    };

    let provider_response = state.exa.search(&query, category, req.limit).await?;

    // Only report an enhanced query when enhancement actually changed it.
    let enhanced_query = (query != req.query).then_some(query);
    let search_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    Ok(Json(aggregate(
        &provider_response.results,
        enhanced_query,
        search_time_ms,
    )))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

fn default_history_limit() -> u32 {
    10
}

/// GET /search/history
///
/// History persistence lives in a separate storage service that is not
/// wired up yet; the endpoint keeps its shape and returns an empty list.
/// TODO: return user-scoped history once bearer auth is enforced here and
/// the history store client lands.
pub async fn handle_history(
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    if !(1..=50).contains(&params.limit) {
        return Err(AppError::Validation(
            "limit must be between 1 and 50".to_string(),
        ));
    }
    Ok(Json(HistoryResponse::default()))
}
