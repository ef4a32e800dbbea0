//! Error types for classtab-svc

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upstream file fetch failed (502)
    #[error("Failed to fetch source file: {0}")]
    Fetch(String),

    /// Source workbook could not be read as a spreadsheet (422)
    #[error("Unreadable workbook: {0}")]
    Workbook(String),

    /// Pipeline-level failure: missing columns or no valid data (422)
    #[error("Processing error: {0}")]
    Pipeline(#[from] classtab_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Fetch(msg) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED", msg),
            ApiError::Workbook(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNREADABLE_WORKBOOK", msg)
            }
            ApiError::Pipeline(ref err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                match err {
                    classtab_core::Error::MissingColumn(_) => "MISSING_COLUMNS",
                    classtab_core::Error::NoValidData => "NO_VALID_DATA",
                },
                err.to_string(),
            ),
            ApiError::Io(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                err.to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
