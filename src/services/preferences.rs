use crate::{
    db::PreferenceStore,
    error::{AppError, AppResult},
    models::{RatingEntry, SavePreferenceRequest, UserPreference},
};

/// Lowest star rating accepted from clients
pub const MIN_RATING: f64 = 1.0;
/// Highest star rating accepted from clients
pub const MAX_RATING: f64 = 5.0;

/// Canonical form of a user id, shared by every read and write path
///
/// Surrounding whitespace is dropped; an id that is empty afterwards is rejected.
pub fn normalize_user_id(user_id: &str) -> AppResult<&str> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::InvalidInput("userId cannot be empty".to_string()));
    }
    Ok(user_id)
}

/// Validates and stores a user's rating
pub async fn save_preference(
    store: &dyn PreferenceStore,
    request: SavePreferenceRequest,
) -> AppResult<UserPreference> {
    let user_id = normalize_user_id(&request.user_id)?;

    if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
        return Err(AppError::InvalidInput(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, request.rating
        )));
    }

    let preference = store
        .upsert(user_id, request.movie_id, request.rating)
        .await?;

    tracing::info!(
        user_id = %preference.user_id,
        movie_id = preference.movie_id,
        rating = preference.rating,
        store = store.name(),
        "Preference saved"
    );

    Ok(preference)
}

/// A user's ratings in the client-facing shape
pub async fn list_ratings(store: &dyn PreferenceStore, user_id: &str) -> AppResult<Vec<RatingEntry>> {
    let preferences = store.list(normalize_user_id(user_id)?).await?;
    Ok(preferences.iter().map(RatingEntry::from).collect())
}
