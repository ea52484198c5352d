use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use brandpulse::analysis::analyst::MarketingAnalyst;
use brandpulse::config::Config;
use brandpulse::llm_client::{self, LlmClient};
use brandpulse::page_meta::HttpPageFetcher;
use brandpulse::routes::build_router;
use brandpulse::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing GROQ_API_KEY stops the process here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BrandPulse API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the completion client (one handle for the whole process)
    let llm = LlmClient::new(config.groq_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let analyst = MarketingAnalyst::new(Arc::new(llm), Arc::new(HttpPageFetcher::new()));

    let state = AppState { analyst };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
