use std::sync::Arc;

use related_products::{
    config::Config,
    routes::{create_router, AppState},
    services::{providers::HttpRankingProvider, InMemoryCatalog, Recommender},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("related_products=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => InMemoryCatalog::from_json_file(path).await?,
        None => {
            tracing::warn!("CATALOG_PATH not set, serving an empty catalog");
            InMemoryCatalog::empty()
        }
    };

    let provider = HttpRankingProvider::new(
        config.ranking_api_url.clone(),
        config.ranking_api_key.clone(),
        config.ranking_timeout(),
    )?;

    tracing::info!(
        ranking_api_url = %config.ranking_api_url,
        timeout_ms = config.ranking_timeout_ms,
        catalog_size = catalog.len(),
        "Recommender configured"
    );

    let state = AppState::new(
        Recommender::new(Arc::new(provider)),
        Arc::new(catalog),
        config.default_limit,
        config.max_limit,
    );
    let app = create_router(Arc::new(state));

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
