use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    services::{engine::RecommendationEngine, providers::CatalogProvider},
};

/// Holds the current catalog as an engine with no ratings
///
/// Per-user engines are derived from this base with `add_rating`, so they all
/// share one copy of the catalog and its id index.
pub struct CatalogService {
    provider: Arc<dyn CatalogProvider>,
    base: RwLock<RecommendationEngine>,
}

impl CatalogService {
    /// Fetches the initial catalog from `provider`
    pub async fn load(provider: Arc<dyn CatalogProvider>) -> AppResult<Self> {
        let movies = provider.fetch_movies().await?;

        tracing::info!(
            provider = provider.name(),
            movies = movies.len(),
            "Catalog loaded"
        );

        Ok(Self {
            base: RwLock::new(RecommendationEngine::from_catalog(movies)),
            provider,
        })
    }

    /// The current catalog snapshot
    pub async fn engine(&self) -> RecommendationEngine {
        self.base.read().await.clone()
    }

    /// Re-fetches the catalog; the previous snapshot is kept if the fetch fails
    pub async fn refresh(&self) -> AppResult<RecommendationEngine> {
        let movies = self.provider.fetch_movies().await?;
        let engine = RecommendationEngine::from_catalog(movies);

        *self.base.write().await = engine.clone();

        tracing::info!(
            provider = self.provider.name(),
            movies = engine.catalog().len(),
            "Catalog refreshed"
        );

        Ok(engine)
    }
}
