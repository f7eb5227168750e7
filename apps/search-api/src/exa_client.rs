//! Client for the Exa semantic-search API.
//!
//! Searches are always made with page text included so the parser has a
//! blob to work on. Transport and API failures surface as [`SearchError`];
//! the route layer maps them to a 5xx response.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::search::RawRecord;

const EXA_API_URL: &str = "https://api.exa.ai";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Categories the provider accepts; anything else falls back to profiles.
const SUPPORTED_CATEGORIES: &[&str] = &["linkedin profile", "company"];
const FALLBACK_CATEGORY: &str = "linkedin profile";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("limit must be between 1 and 50, got {0}")]
    InvalidLimit(u32),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: &'a str,
    category: &'a str,
    num_results: u32,
    contents: ContentsSpec,
}

#[derive(Debug, Serialize)]
struct ContentsSpec {
    text: bool,
}

/// Raw provider response. Only `results` matters downstream; the rest is
/// kept for debug logging.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaSearchResponse {
    #[serde(default)]
    pub results: Vec<RawRecord>,
    #[serde(default)]
    pub resolved_search_type: Option<String>,
}

/// Handle to the search provider. Cheap to clone; constructed once in
/// `main` and carried in the app state.
#[derive(Clone)]
pub struct ExaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, EXA_API_URL.to_string())
    }

    /// Points the client at a different endpoint; used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Runs one semantic search and returns the raw record batch.
    pub async fn search(
        &self,
        query: &str,
        category: &str,
        limit: u32,
    ) -> Result<ExaSearchResponse, SearchError> {
        if !(1..=50).contains(&limit) {
            return Err(SearchError::InvalidLimit(limit));
        }
        let category = if SUPPORTED_CATEGORIES.contains(&category) {
            category
        } else {
            warn!("unsupported category {category:?}; defaulting to {FALLBACK_CATEGORY:?}");
            FALLBACK_CATEGORY
        };

        let request_body = ExaSearchRequest {
            query,
            search_type: "auto",
            category,
            num_results: limit,
            contents: ContentsSpec { text: true },
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ExaSearchResponse = response.json().await?;
        debug!(
            "search returned {} results (resolved type: {:?})",
            parsed.results.len(),
            parsed.resolved_search_type
        );
        Ok(parsed)
    }
}
