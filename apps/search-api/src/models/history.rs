#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry in a user's search history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryItem {
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub results_count: u32,
}

/// Response body for `GET /search/history`.
#[derive(Debug, Default, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}
