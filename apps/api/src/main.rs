use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobscout_api::catalog::JobCatalog;
use jobscout_api::config::Config;
use jobscout_api::keywords::KeywordTracker;
use jobscout_api::matching::classifier::{ClassifierClient, RoleClassification};
use jobscout_api::matching::lexical::LexicalOverlap;
use jobscout_api::routes::build_router;
use jobscout_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobscout API v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Arc::new(JobCatalog::load_jsonl(&config.jobs_path)?);

    let keywords = KeywordTracker::load(
        &config.keywords_path,
        Duration::from_millis(config.keyword_flush_ms),
    );

    if config.hf_api_token.is_none() {
        tracing::warn!("HUGGINGFACE_API_TOKEN not set; the classify endpoint will reject requests");
    }
    let classifier = ClassifierClient::new(config.hf_api_token.clone());

    let state = AppState {
        catalog,
        keywords: keywords.clone(),
        lexical: Arc::new(LexicalOverlap),
        by_role: Arc::new(RoleClassification { client: classifier }),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Final flush so a clean stop never loses the debounce window.
    keywords.flush().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
