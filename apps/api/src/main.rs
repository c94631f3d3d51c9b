use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobmatch_api::catalog::InMemoryJobCatalog;
use jobmatch_api::config::Config;
use jobmatch_api::matching::engine::MatchEngine;
use jobmatch_api::matching::synonyms::SynonymTable;
use jobmatch_api::routes::build_router;
use jobmatch_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing JOBS_PATH)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Match API v{}", env!("CARGO_PKG_VERSION"));

    // Synonym table: built once, shared read-only for the process lifetime
    let synonyms = Arc::new(SynonymTable::default());
    for collision in synonyms.collisions() {
        warn!(
            "Synonym '{}' is listed under both '{}' and '{}'; '{}' wins",
            collision.variant, collision.resolved_key, collision.shadowed_key, collision.resolved_key
        );
    }
    info!("Synonym table initialized ({} groups)", synonyms.len());

    // Load the job catalog snapshot
    let catalog = InMemoryJobCatalog::load(&config.jobs_path).await?;

    let engine = MatchEngine::new(synonyms, config.parallel_threshold);
    info!(
        "Match engine ready (parallel from {} jobs, {}ms budget)",
        config.parallel_threshold, config.match_timeout_ms
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        engine,
        config: config.clone(),
    };

    // Request timeout is applied inside build_router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
