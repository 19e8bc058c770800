/// Catalog data providers
///
/// A provider produces the full list of movies the service recommends from.
/// The catalog is loaded once at startup and again on explicit refresh, so
/// providers are free to be slow or rate limited.
use crate::{error::AppResult, models::Movie};

pub mod static_catalog;
pub mod tmdb;

pub use static_catalog::StaticCatalog;
pub use tmdb::TmdbProvider;

/// Trait for movie catalog sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the complete catalog in the provider's preferred order
    async fn fetch_movies(&self) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
