pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use crate::{
    config::Config,
    db::{Cache, CacheWriterHandle, InMemoryPreferenceStore, PgPreferenceStore, PreferenceStore},
    routes::AppState,
    services::{
        providers::{CatalogProvider, StaticCatalog, TmdbProvider},
        CatalogService,
    },
};

/// Selects the catalog provider: TMDB, then a catalog file, then the bundled catalog
async fn build_catalog_provider(
    config: &Config,
    cache: Option<Cache>,
) -> anyhow::Result<Arc<dyn CatalogProvider>> {
    if let Some(api_key) = &config.tmdb_api_key {
        return Ok(Arc::new(TmdbProvider::new(
            api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            cache,
        )));
    }

    if let Some(path) = &config.catalog_path {
        return Ok(Arc::new(StaticCatalog::from_file(path).await?));
    }

    Ok(Arc::new(StaticCatalog::bundled()?))
}

async fn build_preference_store(config: &Config) -> anyhow::Result<Arc<dyn PreferenceStore>> {
    match &config.database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url).await?;
            tracing::info!("Connected to PostgreSQL");
            Ok(Arc::new(PgPreferenceStore::new(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, preferences will not survive a restart");
            Ok(Arc::new(InMemoryPreferenceStore::new()))
        }
    }
}

/// Builds the shared state from configuration
///
/// Returns the cache writer handle when Redis is configured so the caller can
/// flush it on shutdown.
pub async fn build_state(
    config: &Config,
) -> anyhow::Result<(Arc<AppState>, Option<CacheWriterHandle>)> {
    let (cache, cache_handle) = match &config.redis_url {
        Some(redis_url) => {
            let (cache, handle) = Cache::new(db::create_redis_client(redis_url)?);
            (Some(cache), Some(handle))
        }
        None => (None, None),
    };

    let provider = build_catalog_provider(config, cache).await?;
    let catalog = CatalogService::load(provider).await?;
    let preferences = build_preference_store(config).await?;

    let state = AppState {
        catalog,
        preferences,
        api_key: config.api_key.clone(),
        cors_origin: Some(config.cors_origin.clone()),
    };

    Ok((Arc::new(state), cache_handle))
}

/// Runs the HTTP server until Ctrl-C
pub async fn run(config: Config) -> anyhow::Result<()> {
    let (state, cache_handle) = build_state(&config).await?;
    let app = routes::create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
