use crate::{
    db::PreferenceStore,
    error::AppResult,
    models::{Movie, UserPreference},
    services::{
        catalog::CatalogService, engine::RecommendationEngine, preferences::normalize_user_id,
    },
};

/// Folds stored preferences into an engine, one rating at a time
pub fn apply_preferences(
    base: RecommendationEngine,
    preferences: &[UserPreference],
) -> RecommendationEngine {
    preferences
        .iter()
        .fold(base, |engine, pref| engine.add_rating(pref.movie_id, pref.rating))
}

/// Generates personalized recommendations for a user
///
/// Loads the user's stored ratings and scores the current catalog against
/// them. Users with no ratings get the most popular movies instead.
pub async fn get_recommendations(
    catalog: &CatalogService,
    store: &dyn PreferenceStore,
    user_id: &str,
) -> AppResult<Vec<Movie>> {
    let user_id = normalize_user_id(user_id)?;
    let preferences = store.list(user_id).await?;
    let engine = apply_preferences(catalog.engine().await, &preferences);

    let recommendations: Vec<Movie> = engine.recommendations().into_iter().cloned().collect();

    tracing::info!(
        user_id = %user_id,
        ratings = preferences.len(),
        recommendations = recommendations.len(),
        "Recommendations generated"
    );

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::preferences::MockPreferenceStore;
    use crate::error::AppError;
    use crate::services::providers::StaticCatalog;
    use std::sync::Arc;

    async fn bundled_catalog() -> CatalogService {
        let provider = StaticCatalog::bundled().unwrap();
        CatalogService::load(Arc::new(provider)).await.unwrap()
    }

    fn ids(movies: &[Movie]) -> Vec<i64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn test_cold_start_for_new_user() {
        let catalog = bundled_catalog().await;
        let mut store = MockPreferenceStore::new();
        store.expect_list().returning(|_| Ok(vec![]));

        let movies = get_recommendations(&catalog, &store, "user-1").await.unwrap();
        // Shawshank 9.3, Dark Knight 9.0, Pulp Fiction 8.9
        assert_eq!(ids(&movies), vec![2, 4, 5]);
    }

    #[tokio::test]
    async fn test_personalized_for_rated_user() {
        let catalog = bundled_catalog().await;
        let mut store = MockPreferenceStore::new();
        store
            .expect_list()
            .withf(|user_id| user_id == "user-1")
            .returning(|user_id| Ok(vec![UserPreference::new(user_id, 5, 5.0)]));

        let movies = get_recommendations(&catalog, &store, "user-1").await.unwrap();
        // Pulp Fiction is {Crime, Drama}:
        // Dark Knight 2/3, Shawshank 1/2, Interstellar 1/4, Inception 0
        assert_eq!(ids(&movies), vec![4, 2, 3, 1]);
    }

    #[tokio::test]
    async fn test_user_id_is_normalized_before_lookup() {
        let catalog = bundled_catalog().await;
        let mut store = MockPreferenceStore::new();
        store
            .expect_list()
            .withf(|user_id| user_id == "bob")
            .times(1)
            .returning(|user_id| Ok(vec![UserPreference::new(user_id, 5, 5.0)]));

        let movies = get_recommendations(&catalog, &store, " bob").await.unwrap();
        assert_eq!(ids(&movies), vec![4, 2, 3, 1]);
    }

    #[tokio::test]
    async fn test_blank_user_id_rejected() {
        let catalog = bundled_catalog().await;
        let store = MockPreferenceStore::new();

        let result = get_recommendations(&catalog, &store, "  ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let catalog = bundled_catalog().await;
        let mut store = MockPreferenceStore::new();
        store
            .expect_list()
            .returning(|_| Err(AppError::Internal("store offline".to_string())));

        let result = get_recommendations(&catalog, &store, "user-1").await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_apply_preferences_later_rating_wins() {
        let base = RecommendationEngine::from_catalog(vec![
            Movie::new(1, "A", &["Drama"], 5.0),
            Movie::new(2, "B", &["Drama"], 5.0),
        ]);
        let prefs = vec![
            UserPreference::new("u", 1, 1.0),
            UserPreference::new("u", 1, 4.0),
        ];

        let engine = apply_preferences(base.clone(), &prefs);
        assert_eq!(engine.ratings().get(&1), Some(&4.0));
        assert!(base.ratings().is_empty());
    }
}
