use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::Movie, routes::AppState,
};

/// Handler for the catalog listing
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Movie>> {
    let engine = state.catalog.engine().await;
    Json(engine.catalog().to_vec())
}

/// Handler that re-fetches the catalog from its provider
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Vec<Movie>>> {
    tracing::info!(request_id = %request_id, "Refreshing catalog");

    let engine = state.catalog.refresh().await?;
    Ok(Json(engine.catalog().to_vec()))
}
