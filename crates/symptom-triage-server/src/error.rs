//! API error types with JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error response body: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request field; the message is returned verbatim.
    #[error("Invalid request: {0}")]
    BadRequest(&'static str),

    /// Anything that fails past validation. Only `message` reaches the
    /// caller; `detail` is logged.
    #[error("{message}: {detail}")]
    Internal {
        message: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, detail: impl ToString) -> Self {
        ApiError::Internal {
            message,
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal { message, detail } => {
                tracing::error!(%detail, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = ErrorBody {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
