mod aggregator;
mod config;
mod errors;
mod exa_client;
mod llm_client;
mod models;
mod parser;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::exa_client::ExaClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting search API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the search provider client
    let exa = ExaClient::new(config.exa_api_key.clone());
    info!("search provider client initialized");

    // Query enhancement is optional — skipped entirely without a key
    let llm = config.anthropic_api_key.clone().map(LlmClient::new);
    match &llm {
        Some(_) => info!("LLM client initialized (model: {})", llm_client::MODEL),
        None => info!("ANTHROPIC_API_KEY not set; query enhancement disabled"),
    }

    let state = AppState {
        exa,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
