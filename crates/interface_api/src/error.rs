//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::source::SourceError;
use domain_analytics::AnalyticsError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed ledger: {0}")]
    MalformedLedger(String),

    #[error("Upstream data source failed: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::MalformedLedger(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "malformed_ledger", msg.clone())
            }
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::MalformedLedger(msg) => ApiError::MalformedLedger(msg),
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            // A payload the source cannot even parse is malformed input,
            // not a transport failure.
            SourceError::Parse(_) => ApiError::MalformedLedger(err.to_string()),
            SourceError::Io(_) => ApiError::Upstream(err.to_string()),
        }
    }
}
