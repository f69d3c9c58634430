//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identifier of a row in `users`
pub type UserId = i64;

/// User entity, including the stored credential hash
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// New user creation payload; `email` is already normalized
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user, returned after registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Request for user registration
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for user login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Request for changing the current user's password
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
