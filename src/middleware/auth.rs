use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Middleware that rejects requests without the configured bearer token
///
/// Passes everything through when no key is configured.
pub async fn require_api_key(
    State(api_key): State<Option<String>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    if provided != Some(expected) {
        tracing::warn!(uri = %request.uri(), "Rejected request with missing or invalid API key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Extracts the token from `Bearer <token>`; at least one space and a
/// non-empty token are required
fn bearer_token(header: &str) -> Option<&str> {
    let rest = header.strip_prefix("Bearer")?;
    let token = rest.trim_start();
    if token.len() == rest.len() || token.is_empty() {
        return None;
    }
    Some(token)
}
