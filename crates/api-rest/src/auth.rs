use crate::error::ApiError;
use crate::AppState;
use api_shared::{validate_api_key, API_KEY_HEADER};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Rejects requests whose `x-api-key` does not match the configured key.
///
/// When no key is configured every request passes through.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(err) = validate_api_key(provided, state.api_key.as_deref()) {
        tracing::debug!(path = %req.uri().path(), error = %err, "rejected request");
        return ApiError::from(err).into_response();
    }

    next.run(req).await
}
