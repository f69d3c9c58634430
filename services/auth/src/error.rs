//! Custom error types for the authentication service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{error::DatabaseError, token::TokenError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::PasswordViolations;

/// Custom error type for authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User with this email already exists")]
    UserExists,

    /// Unknown email or wrong password; never says which
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    WeakPassword(PasswordViolations),

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AuthError::UserExists => (StatusCode::CONFLICT, json!({ "error": self.to_string() })),
            AuthError::InvalidCredentials | AuthError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "error": self.to_string() }))
            }
            AuthError::WeakPassword(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string(), "details": details }),
            ),
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AuthError::Token(_) | AuthError::Hashing(_) | AuthError::Storage(_) => {
                error!(error = %self, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(rejection.body_text())
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
