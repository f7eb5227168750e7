//! Text extraction for uploaded résumés.
//!
//! The primary path is the hosted document-parse API, which handles scanned
//! and image-heavy PDFs. When no key is configured the service falls back
//! to local text-layer extraction, which is good enough for digitally
//! authored résumés.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{multipart, Client};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const DOCPARSE_API_URL: &str = "https://api.va.landing.ai/v1/tools/agentic-document-analysis";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum DocParseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("document parse API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("local PDF extraction failed: {0}")]
    Extract(String),
}

#[derive(Debug, Default, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    data: ParseData,
}

#[derive(Debug, Default, Deserialize)]
struct ParseData {
    #[serde(default)]
    markdown: String,
}

/// Handle to the document-parse provider. `api_key: None` selects the
/// local fallback.
#[derive(Clone)]
pub struct DocParseClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl DocParseClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DOCPARSE_API_URL.to_string())
    }

    /// Points the client at a different endpoint; used by tests.
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Extracts markdown text from PDF bytes. An unreadable or empty
    /// document yields an empty string, not an error; the caller decides
    /// whether that is acceptable.
    pub async fn extract_text(&self, pdf: Bytes) -> Result<String, DocParseError> {
        match &self.api_key {
            Some(key) => self.extract_remote(key, pdf).await,
            None => extract_text_local(&pdf),
        }
    }

    async fn extract_remote(&self, api_key: &str, pdf: Bytes) -> Result<String, DocParseError> {
        let part = multipart::Part::bytes(pdf.to_vec())
            .file_name("resume.pdf")
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("pdf", part);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Basic {api_key}"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DocParseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ParseResponse = response.json().await?;
        debug!(
            "document parse returned {} bytes of markdown",
            parsed.data.markdown.len()
        );
        Ok(parsed.data.markdown.trim().to_string())
    }
}

/// Local fallback: text-layer extraction only, no OCR.
fn extract_text_local(pdf: &Bytes) -> Result<String, DocParseError> {
    let text = pdf_extract::extract_text_from_mem(pdf)
        .map_err(|e| DocParseError::Extract(e.to_string()))?;
    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_remote_extraction_returns_trimmed_markdown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"markdown": "  # Jane Doe\nEngineer  "}
            })))
            .mount(&server)
            .await;

        let client =
            DocParseClient::with_base_url(Some("key".to_string()), format!("{}/", server.uri()));
        let text = client.extract_text(Bytes::from_static(b"%PDF-")).await.unwrap();
        assert_eq!(text, "# Jane Doe\nEngineer");
    }

    #[tokio::test]
    async fn test_remote_extraction_handles_missing_markdown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let client =
            DocParseClient::with_base_url(Some("key".to_string()), format!("{}/", server.uri()));
        let text = client.extract_text(Bytes::from_static(b"%PDF-")).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_remote_extraction_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unsupported file"))
            .mount(&server)
            .await;

        let client =
            DocParseClient::with_base_url(Some("key".to_string()), format!("{}/", server.uri()));
        let err = client
            .extract_text(Bytes::from_static(b"not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocParseError::Api { status: 422, .. }));
    }

    #[tokio::test]
    async fn test_local_fallback_rejects_garbage_bytes() {
        let client = DocParseClient::new(None);
        let err = client
            .extract_text(Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocParseError::Extract(_)));
    }
}
