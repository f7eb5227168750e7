use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::crawl_client::CrawlClient;
use crate::docparse_client::DocParseClient;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Clients are constructed once in `main` and handed in here;
/// nothing in this service reaches for process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub s3: S3Client,
    pub docparse: DocParseClient,
    pub crawler: CrawlClient,
    pub llm: LlmClient,
    /// Identity-provider seam; trait object so tests can stub it.
    pub verifier: Arc<dyn TokenVerifier>,
    pub config: Config,
}
