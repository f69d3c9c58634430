//! User repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::{debug, info};

use super::CredentialStore;
use crate::models::{NewUser, User, UserId};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        info!(email = %new_user.email, "Creating new user");

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id, user_name, email, password_hash, created_at
            "#,
        )
        .bind(&new_user.user_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        debug!(email, "Finding user by email");

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> DatabaseResult<Option<User>> {
        debug!(user_id, "Finding user by ID");

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, user_name, email, password_hash, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_password(&self, user_id: UserId, password_hash: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
