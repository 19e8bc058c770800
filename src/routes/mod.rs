use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::PreferenceStore,
    middleware::{
        auth::require_api_key,
        request_id::{make_span_with_request_id, request_id_middleware},
    },
    services::CatalogService,
};

pub mod movies;
pub mod preferences;
pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub catalog: CatalogService,
    pub preferences: Arc<dyn PreferenceStore>,
    /// Bearer token for `/api/v1`; `None` disables auth
    pub api_key: Option<String>,
    /// Browser origin allowed by CORS; `None` disables the CORS layer
    pub cors_origin: Option<String>,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware));

    match cors_layer(state.cors_origin.as_deref()) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// API routes under /api/v1
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(movies::list))
        .route("/movies/refresh", post(movies::refresh))
        .route("/preferences", post(preferences::save))
        .route("/preferences/:user_id", get(preferences::list))
        .route("/recommendations/:user_id", get(recommendations::recommend))
        .route_layer(middleware::from_fn_with_state(
            state.api_key.clone(),
            require_api_key,
        ))
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> Option<CorsLayer> {
    let origin = origin?;
    match HeaderValue::from_str(origin) {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        ),
        Err(e) => {
            tracing::warn!(origin = %origin, error = %e, "Invalid CORS origin, CORS disabled");
            None
        }
    }
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::InMemoryPreferenceStore, services::providers::StaticCatalog};
    use axum_test::{TestResponse, TestServer};

    const ORIGIN: &str = "http://localhost:5173";

    async fn create_state(cors_origin: Option<&str>) -> Arc<AppState> {
        let provider = StaticCatalog::bundled().unwrap();
        Arc::new(AppState {
            catalog: CatalogService::load(Arc::new(provider)).await.unwrap(),
            preferences: Arc::new(InMemoryPreferenceStore::new()),
            api_key: None,
            cors_origin: cors_origin.map(str::to_string),
        })
    }

    async fn preflight(cors_origin: Option<&str>) -> TestResponse {
        let server = TestServer::new(create_router(create_state(cors_origin).await)).unwrap();
        server
            .method(Method::OPTIONS, "/api/v1/movies")
            .add_header(header::ORIGIN, HeaderValue::from_static(ORIGIN))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("GET"),
            )
            .await
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let response = preflight(Some(ORIGIN)).await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static(ORIGIN))
        );
    }

    #[tokio::test]
    async fn test_no_cors_headers_without_origin() {
        let response = preflight(None).await;

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[test]
    fn test_invalid_cors_origin_disables_layer() {
        assert!(cors_layer(Some("bad\norigin")).is_none());
        assert!(cors_layer(None).is_none());
    }
}
