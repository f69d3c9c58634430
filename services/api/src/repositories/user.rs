//! User repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use super::{UserDirectory, UserExistenceChecker};
use crate::models::{
    UserId,
    user::{UserProfile, UserSummary},
};

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
impl UserExistenceChecker for UserRepository {
    async fn user_exists(&self, user_id: UserId) -> DatabaseResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_id(&self, user_id: UserId) -> DatabaseResult<Option<UserSummary>> {
        debug!(user_id, "Finding user by ID");

        let user = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT user_id, user_name, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_profile(&self, user_id: UserId) -> DatabaseResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT user_id, user_name, email, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn count_users(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list_users(&self, offset: i64, limit: i64) -> DatabaseResult<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT user_id, user_name, created_at
            FROM users
            ORDER BY user_name ASC, user_id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn update_name(
        &self,
        user_id: UserId,
        user_name: &str,
    ) -> DatabaseResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE users
            SET user_name = $2
            WHERE user_id = $1
            RETURNING user_id, user_name, email, created_at
            "#,
        )
        .bind(user_id)
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Delete the user row on an open connection or transaction
pub(crate) async fn delete_user(conn: &mut PgConnection, user_id: UserId) -> DatabaseResult<bool> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
