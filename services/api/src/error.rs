//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::{ErrorKind, ServiceError};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Malformed request
    #[error("{0}")]
    BadRequest(String),

    /// Outcome of a business workflow
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Service(err) => match err.kind() {
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
                ErrorKind::Conflict => (StatusCode::CONFLICT, err.to_string()),
                ErrorKind::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.to_string()),
                ErrorKind::Storage => {
                    error!(error = %err, "Request failed with storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
