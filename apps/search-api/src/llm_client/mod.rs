//! LLM client for query enhancement.
//!
//! Enhancement is strictly best-effort: a transport failure, an API error,
//! or an empty completion all fall back to the caller's original query, so
//! a search never fails because of this step.

pub mod prompts;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Lightweight model — enhancement sits on the request path.
pub const MODEL: &str = "claude-3-5-haiku-latest";
const MAX_TOKENS: u32 = 512;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

/// Handle to the language-model provider, constructed in `main` only when
/// an API key is configured.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, ANTHROPIC_API_URL.to_string())
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

    /// Rewrites a raw user query into one tuned for the semantic-search
    /// provider. Falls back to the original query on any failure.
    pub async fn enhance_query(&self, query: &str, category: &str, limit: u32) -> String {
        let prompt = prompts::enhancement_prompt(query, category, limit);
        match self.complete(&prompt, prompts::ENHANCE_SYSTEM).await {
            Ok(text) => {
                let enhanced = text.trim();
                if enhanced.is_empty() {
                    query.to_string()
                } else {
                    debug!("query enhanced: {query:?} -> {enhanced:?}");
                    enhanced.to_string()
                }
            }
            Err(e) => {
                warn!("query enhancement failed, using original query: {e}");
                query.to_string()
            }
        }
    }

    /// One messages-API call, returning the first text block.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = response.json().await?;
        parsed
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(server: &MockServer) -> LlmClient {
        LlmClient::with_base_url("test-key".to_string(), server.uri())
    }

    fn completion_body(text: &str) -> serde_json::Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    #[tokio::test]
    async fn test_enhance_query_returns_completion_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("senior rust engineers in stockholm")),
            )
            .mount(&server)
            .await;

        let enhanced = test_client(&server)
            .enhance_query("rust devs sweden", "linkedin profile", 10)
            .await;
        assert_eq!(enhanced, "senior rust engineers in stockholm");
    }

    #[tokio::test]
    async fn test_enhance_query_falls_back_on_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let enhanced = test_client(&server)
            .enhance_query("rust devs sweden", "linkedin profile", 10)
            .await;
        assert_eq!(enhanced, "rust devs sweden");
    }

    #[tokio::test]
    async fn test_enhance_query_falls_back_on_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  ")))
            .mount(&server)
            .await;

        let enhanced = test_client(&server)
            .enhance_query("rust devs sweden", "linkedin profile", 10)
            .await;
        assert_eq!(enhanced, "rust devs sweden");
    }
}
