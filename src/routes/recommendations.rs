use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::Movie, routes::AppState,
    services::recommendations,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Movie>>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        "Processing recommendation request"
    );

    let movies = recommendations::get_recommendations(
        &state.catalog,
        state.preferences.as_ref(),
        &user_id,
    )
    .await?;

    Ok(Json(movies))
}
