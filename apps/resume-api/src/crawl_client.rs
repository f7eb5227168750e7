//! Client for the Firecrawl scrape API.
//!
//! Job postings are fetched as main-content markdown; boilerplate (nav,
//! footers, cookie banners) is stripped provider-side.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("crawl API returned status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    scrape_options: ScrapeOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeOptions {
    only_main_content: bool,
    formats: &'static [&'static str],
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    data: ScrapeData,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: String,
}

/// Handle to the crawl provider.
#[derive(Clone)]
pub struct CrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CrawlClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, FIRECRAWL_API_URL.to_string())
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

    /// Scrapes one URL and returns its main content as markdown. A page
    /// the provider cannot extract comes back as an empty string, not an
    /// error.
    pub async fn scrape(&self, url: &str) -> Result<String, CrawlError> {
        let request_body = ScrapeRequest {
            url,
            scrape_options: ScrapeOptions {
                only_main_content: true,
                formats: &["markdown"],
            },
        };

        let response = self
            .client
            .post(format!("{}/v2/scrape", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ScrapeResponse = response.json().await?;
        Ok(parsed.data.markdown.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(server: &MockServer) -> CrawlClient {
        CrawlClient::with_base_url("crawl-key".to_string(), server.uri())
    }

    #[tokio::test]
    async fn test_scrape_returns_markdown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/scrape"))
            .and(header("Authorization", "Bearer crawl-key"))
            .and(body_partial_json(json!({
                "url": "https://example.com/job",
                "scrapeOptions": {"onlyMainContent": true, "formats": ["markdown"]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"markdown": "# Senior Engineer\nWe need Rust.\n"}
            })))
            .mount(&server)
            .await;

        let content = test_client(&server)
            .scrape("https://example.com/job")
            .await
            .unwrap();
        assert_eq!(content, "# Senior Engineer\nWe need Rust.");
    }

    #[tokio::test]
    async fn test_scrape_missing_content_is_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let content = test_client(&server)
            .scrape("https://example.com/empty")
            .await
            .unwrap();
        assert_eq!(content, "");
    }

    #[tokio::test]
    async fn test_scrape_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/scrape"))
            .respond_with(ResponseTemplate::new(403).set_body_string("blocked"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .scrape("https://example.com/job")
            .await
            .unwrap_err();
        assert!(matches!(err, CrawlError::Api { status: 403, .. }));
    }
}
