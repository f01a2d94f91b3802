use std::sync::Arc;

use anirec::{
    api::{create_router, AppState},
    config::Config,
    db::{create_redis_client, MemorySearchTermStore, RedisSearchTermStore, SearchTermStore},
    models::{Limit, SortOrder},
    services::JikanProvider,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("anirec=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = Config::from_env()?;
    let default_sort: SortOrder = config.default_sort.parse()?;
    let default_limit = Limit::new(config.default_limit)
        .ok_or_else(|| anyhow::anyhow!("DEFAULT_LIMIT must be a positive whole number"))?;

    // Last-search store: Redis when configured, otherwise process memory
    let (store, writer_handle) = match &config.redis_url {
        Some(redis_url) => {
            let client = create_redis_client(redis_url)?;
            let (store, handle) = RedisSearchTermStore::new(client);
            tracing::info!("Using Redis for the last-search store");
            (Arc::new(store) as Arc<dyn SearchTermStore>, Some(handle))
        }
        None => {
            tracing::info!("REDIS_URL not set, keeping the last search in memory");
            (
                Arc::new(MemorySearchTermStore::new()) as Arc<dyn SearchTermStore>,
                None,
            )
        }
    };

    let provider = Arc::new(JikanProvider::new(config.jikan_api_url.clone()));
    let state = AppState::new(provider, store).with_defaults(default_limit, default_sort);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), api = %config.jikan_api_url, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = writer_handle {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
