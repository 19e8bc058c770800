pub mod catalog;
pub mod engine;
pub mod preferences;
pub mod providers;
pub mod recommendations;
pub mod similarity;

pub use catalog::CatalogService;
pub use engine::{EngineError, Ratings, RecommendationEngine};
pub use similarity::genre_similarity;
