//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use precis_core::PrecisError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// The request carried no URLs.
    NoUrls,
    /// The body claimed to be a form but could not be read as one.
    InvalidForm(String),
    /// Anything else; the detail is logged, never returned.
    Internal(String),
}

impl From<PrecisError> for ApiError {
    fn from(err: PrecisError) -> Self {
        match err {
            PrecisError::EmptyBatch => ApiError::NoUrls,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NoUrls => (StatusCode::BAD_REQUEST, "No article URLs provided."),
            ApiError::InvalidForm(detail) => {
                tracing::warn!(error = %detail, "unreadable form body");
                (StatusCode::BAD_REQUEST, "Invalid form body.")
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "batch failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        };

        (status, Json(ErrorBody { error: message.to_string() })).into_response()
    }
}
