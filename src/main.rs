//! Pencraft - content ranking and search service

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pencraft::{
    api::{self, AppState},
    cache::create_cache,
    config::Config,
    services::CatalogService,
    source::create_source,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pencraft=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pencraft {}...", env!("CARGO_PKG_VERSION"));

    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    let source = create_source(&config.source).context("Failed to create content source")?;
    tracing::info!("Content source: {}", source.describe());

    let cache = create_cache(&config.cache);
    let catalog_service = Arc::new(CatalogService::new(
        source,
        cache,
        config.ranking.clone(),
        config.content.clone(),
    ));

    // Serve an empty catalog rather than refusing to start; the refresh task retries
    if let Err(e) = catalog_service.reload().await {
        tracing::error!("Initial catalog load failed: {}", e);
    }

    if config.source.refresh_interval_secs > 0 {
        let service = Arc::clone(&catalog_service);
        let period = Duration::from_secs(config.source.refresh_interval_secs);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                // Errors are logged by the service
                let _ = service.reload().await;
            }
        });
        tracing::info!("Catalog refresh every {}s", period.as_secs());
    }

    let state = AppState::new(catalog_service);
    let app = api::build_router(state, &config.server.cors_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
