use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{RatingEntry, SavePreferenceRequest},
    routes::AppState,
    services::preferences,
};

/// Handler for saving a rating
pub async fn save(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<SavePreferenceRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    tracing::info!(
        request_id = %request_id,
        movie_id = request.movie_id,
        "Saving preference"
    );

    preferences::save_preference(state.preferences.as_ref(), request).await?;

    Ok(Json(json!({ "message": "Preference saved successfully" })))
}

/// Handler for listing a user's ratings
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<RatingEntry>>> {
    let ratings = preferences::list_ratings(state.preferences.as_ref(), &user_id).await?;
    Ok(Json(ratings))
}
