use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use learnpath_api::{
    api::{create_router, AppState},
    config::{CatalogBackend, Config},
    db::{
        create_pool, create_redis_client, Cache, CacheWriterHandle, CachedStore, InMemoryStore,
        PgResourceStore, ResourceCatalog, ResourceStore,
    },
    middleware::RateLimits,
    services::RecommendationEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("learnpath_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let (store, cache_handle) = build_store(&config).await?;
    tracing::info!(backend = store.name(), "Catalog ready");

    let state = AppState::new(store)
        .with_engine(RecommendationEngine::new(config.scoring_weights()))
        .with_rate_limits(RateLimits::from_config(&config));

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        let handled = handle.shutdown().await;
        tracing::info!(handled, "Cache writer stopped");
    }

    Ok(())
}

/// Selects the catalog backend and wraps it in the Redis cache when configured
async fn build_store(
    config: &Config,
) -> anyhow::Result<(Arc<dyn ResourceStore>, Option<CacheWriterHandle>)> {
    let store: Arc<dyn ResourceStore> = match config.catalog_backend {
        CatalogBackend::Memory if config.seed_catalog => Arc::new(InMemoryStore::seeded()),
        CatalogBackend::Memory => Arc::new(InMemoryStore::new()),
        CatalogBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not set")?;
            Arc::new(PgResourceStore::new(create_pool(url).await?))
        }
    };

    let Some(redis_url) = config.redis_url.as_deref() else {
        return Ok((store, None));
    };

    let client = create_redis_client(redis_url)?;
    let (cache, handle) = Cache::new(client).await;
    tracing::info!(ttl = config.catalog_cache_ttl, "Catalog cache enabled");

    let cached: Arc<dyn ResourceStore> =
        Arc::new(CachedStore::new(store, cache, config.catalog_cache_ttl));
    Ok((cached, Some(handle)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
