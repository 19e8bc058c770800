use std::path::Path;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::{
        engine::{Ratings, RecommendationEngine},
        providers::CatalogProvider,
    },
};

const BUNDLED_CATALOG: &str = include_str!("../../../data/movies.json");

/// A fixed catalog held in memory
///
/// Built either from the catalog bundled with the binary or from a JSON file
/// containing an array of movies.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    movies: Arc<[Movie]>,
}

impl StaticCatalog {
    /// The catalog compiled into the binary
    pub fn bundled() -> AppResult<Self> {
        Self::parse(BUNDLED_CATALOG)
    }

    /// Reads a catalog from a JSON file
    pub async fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::Internal(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;

        let catalog = Self::parse(&contents)?;
        tracing::info!(
            path = %path.display(),
            movies = catalog.movies.len(),
            "Loaded catalog file"
        );

        Ok(catalog)
    }

    fn parse(contents: &str) -> AppResult<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| AppError::InvalidInput(format!("Catalog is not valid JSON: {}", e)))?;

        // Same array check the engine applies to untyped input
        let engine = RecommendationEngine::from_json(value, Ratings::new())?;

        Ok(Self {
            movies: engine.catalog().into(),
        })
    }
}

#[async_trait::async_trait]
impl CatalogProvider for StaticCatalog {
    async fn fetch_movies(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies.to_vec())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
