use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, INVALID_TOKEN};
use crate::state::AppState;

/// Header carrying the shared secret
pub const TOKEN_HEADER: &str = "token";

/// Rejects the request with 401 unless the `token` header matches the configured secret
pub async fn require_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !token_matches(&headers, &state.token) {
        tracing::warn!(
            "Rejected {} {}: missing or invalid token",
            request.method(),
            request.uri().path()
        );
        return Err(ApiError::unauthorized(INVALID_TOKEN));
    }

    Ok(next.run(request).await)
}

/// An absent or empty header never matches, even when no secret is configured.
fn token_matches(headers: &HeaderMap, expected: &str) -> bool {
    match headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(token) if !token.is_empty() => token == expected,
        _ => false,
    }
}
