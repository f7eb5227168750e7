//! LLM client — the single point of entry for analysis-model calls.
//!
//! The analysis prompt instructs the model to emit one JSON document
//! matching [`AnalysisReport`]; models occasionally wrap it in markdown
//! code fences anyway, so the response text is de-fenced before parsing.

pub mod prompts;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::AnalysisReport;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f32 = 0.2;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Transport failures, rate limits, and upstream 5xx are retried;
    /// parse failures and empty content are not.
    fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::Parse(_) | LlmError::EmptyContent => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
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
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Handle to the language-model provider.
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

    /// Scores one résumé against one scraped job posting.
    pub async fn generate_analysis(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> Result<AnalysisReport, LlmError> {
        let prompt = prompts::analysis_prompt(resume_text, job_text);
        let text = self.complete_with_retry(&prompt, prompts::ANALYSIS_SYSTEM).await?;
        let json = strip_json_fences(&text);
        serde_json::from_str(json).map_err(LlmError::Parse)
    }

    /// Retries transient failures with exponential backoff (1s, 2s).
    async fn complete_with_retry(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let mut attempt = 0;
        loop {
            match self.complete(prompt, system).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt + 1 < MAX_RETRIES => {
                    let delay = Duration::from_millis(1000 << attempt);
                    warn!(
                        "LLM call attempt {} failed ({e}); retrying after {}ms",
                        attempt + 1,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One messages-API call, returning the first text block.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
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
        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        parsed
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips a wrapping markdown code fence (```json … ``` or ``` … ```)
/// from model output before JSON parsing.
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    fn report_json() -> serde_json::Value {
        json!({
            "match_score": 72.0,
            "summary": "Solid fit for the backend role.",
            "keyword_analysis": {
                "matched_keywords": ["Rust"],
                "missing_keywords": ["Kubernetes"]
            },
            "experience_match": [],
            "suggestions": ["Mention container orchestration work"]
        })
    }

    fn completion_body(text: &str) -> serde_json::Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 100, "output_tokens": 50}
        })
    }

    #[tokio::test]
    async fn test_generate_analysis_parses_fenced_json() {
        let server = MockServer::start().await;
        let fenced = format!("```json\n{}\n```", report_json());
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(&fenced)))
            .mount(&server)
            .await;

        let client =
            LlmClient::with_base_url("key".to_string(), format!("{}/", server.uri()));
        let report = client.generate_analysis("resume", "job").await.unwrap();
        assert!((report.match_score - 72.0).abs() < f64::EPSILON);
        assert_eq!(report.keyword_analysis.missing_keywords, vec!["Kubernetes"]);
    }

    #[tokio::test]
    async fn test_generate_analysis_retries_on_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body(&report_json().to_string())),
            )
            .mount(&server)
            .await;

        let client =
            LlmClient::with_base_url("key".to_string(), format!("{}/", server.uri()));
        let report = client.generate_analysis("resume", "job").await.unwrap();
        assert_eq!(report.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_analysis_rejects_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body("not json at all")),
            )
            .mount(&server)
            .await;

        let client =
            LlmClient::with_base_url("key".to_string(), format!("{}/", server.uri()));
        let err = client.generate_analysis("resume", "job").await.unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }
}
