mod config;
mod extraction;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::deterministic::SkillDictionary;
use crate::extraction::pipeline::ProfileExtractor;
use crate::extraction::semantic::ExtractionSettings;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Extraction API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model client
    let llm = LlmClient::new(
        config.ollama_base_url.clone(),
        config.extraction_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    // Build the extraction pipeline with its injected configuration
    let extractor = ProfileExtractor::new(
        Arc::new(llm),
        ExtractionSettings::from(&config),
        SkillDictionary::default(),
    );
    info!(
        timeout_ms = config.semantic_timeout.as_millis() as u64,
        confidence_threshold = config.confidence_threshold as f64,
        "extraction pipeline initialized"
    );

    // Build app state
    let state = AppState { extractor };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
