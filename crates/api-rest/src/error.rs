use api_shared::{AuthError, ErrorBody};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medrec_core::RecordsError;

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Records(#[from] RecordsError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Records(err) => match err {
                RecordsError::PatientNotFound(_) => {
                    (StatusCode::NOT_FOUND, "PATIENT_NOT_FOUND", err.to_string())
                }
                RecordsError::InvalidInput(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
                }
                RecordsError::DuplicateId { .. } => {
                    (StatusCode::BAD_REQUEST, "DUPLICATE_ID", err.to_string())
                }
                RecordsError::InvalidPreviousResult { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_PREVIOUS_RESULT",
                    err.to_string(),
                ),
                RecordsError::ResponseOwnership(_) => {
                    (StatusCode::BAD_REQUEST, "RESPONSE_OWNERSHIP", err.to_string())
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "internal server error".to_string(),
                ),
            },
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.clone())
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "NOT_FOUND", message.clone()),
            ApiError::Unauthorized(err) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody::new(code, message))).into_response()
    }
}
