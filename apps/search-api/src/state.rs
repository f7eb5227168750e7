use crate::config::Config;
use crate::exa_client::ExaClient;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum
/// extractors. Clients are constructed once in `main` and handed in here;
/// nothing in this service reaches for process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub exa: ExaClient,
    /// `None` when no LLM key is configured — searches then run on the
    /// user's original query.
    pub llm: Option<LlmClient>,
    pub config: Config,
}
