use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dto::ErrorResponse;
use crate::error::SlidereelError;

/// HTTP-facing error: every failure becomes a status code plus a
/// `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or incomplete request; nothing was processed.
    BadRequest(String),
    /// Request body over the configured limit; rejected before parsing.
    PayloadTooLarge(String),
    /// Pipeline failure after validation passed.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(error = %msg, "request body too large");
                (StatusCode::PAYLOAD_TOO_LARGE, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "video creation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<SlidereelError> for ApiError {
    fn from(e: SlidereelError) -> Self {
        match e {
            SlidereelError::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(format!("video creation failed: {other}")),
        }
    }
}
