//! Follow graph repository
//!
//! Friendship is never stored. It is derived from the follow edges by a
//! self-join, so every answer reflects the edge set at statement time.

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use super::{FollowGraph, FriendshipOracle, Relation, RelationshipQuery};
use crate::models::{UserId, user::UserSummary};

/// Follow repository
#[derive(Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    /// Create a new follow repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Relation {
    fn count_sql(&self) -> &'static str {
        match self {
            Relation::Friends => {
                r#"
                SELECT COUNT(*)
                FROM follows f1
                JOIN follows f2
                  ON f2.follower_id = f1.followee_id AND f2.followee_id = f1.follower_id
                JOIN users u ON u.user_id = f1.followee_id
                WHERE f1.follower_id = $1
                "#
            }
            Relation::Followers => {
                r#"
                SELECT COUNT(*)
                FROM follows f
                JOIN users u ON u.user_id = f.follower_id
                WHERE f.followee_id = $1
                "#
            }
            Relation::Followings => {
                r#"
                SELECT COUNT(*)
                FROM follows f
                JOIN users u ON u.user_id = f.followee_id
                WHERE f.follower_id = $1
                "#
            }
        }
    }

    fn page_sql(&self) -> &'static str {
        match self {
            Relation::Friends => {
                r#"
                SELECT u.user_id, u.user_name, u.created_at
                FROM follows f1
                JOIN follows f2
                  ON f2.follower_id = f1.followee_id AND f2.followee_id = f1.follower_id
                JOIN users u ON u.user_id = f1.followee_id
                WHERE f1.follower_id = $1
                ORDER BY u.user_name ASC, u.user_id ASC
                LIMIT $2 OFFSET $3
                "#
            }
            Relation::Followers => {
                r#"
                SELECT u.user_id, u.user_name, u.created_at
                FROM follows f
                JOIN users u ON u.user_id = f.follower_id
                WHERE f.followee_id = $1
                ORDER BY u.user_name ASC, u.user_id ASC
                LIMIT $2 OFFSET $3
                "#
            }
            Relation::Followings => {
                r#"
                SELECT u.user_id, u.user_name, u.created_at
                FROM follows f
                JOIN users u ON u.user_id = f.followee_id
                WHERE f.follower_id = $1
                ORDER BY u.user_name ASC, u.user_id ASC
                LIMIT $2 OFFSET $3
                "#
            }
        }
    }
}

#[async_trait]
impl FollowGraph for FollowRepository {
    async fn create_follow(&self, follower_id: UserId, followee_id: UserId) -> DatabaseResult<()> {
        debug!(follower_id, followee_id, "Creating follow edge");

        let result = sqlx::query("INSERT INTO follows (follower_id, followee_id) VALUES ($1, $2)")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(common::error::DatabaseError::NoRowsAffected("create_follow"));
        }

        Ok(())
    }

    async fn delete_follow(&self, follower_id: UserId, followee_id: UserId) -> DatabaseResult<bool> {
        debug!(follower_id, followee_id, "Deleting follow edge");

        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl FriendshipOracle for FollowRepository {
    async fn are_friends(&self, a: UserId, b: UserId) -> DatabaseResult<bool> {
        let friends: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM follows f1
                JOIN follows f2
                  ON f2.follower_id = f1.followee_id AND f2.followee_id = f1.follower_id
                WHERE f1.follower_id = $1 AND f1.followee_id = $2
            )
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_one(&self.pool)
        .await?;

        Ok(friends)
    }
}

#[async_trait]
impl RelationshipQuery for FollowRepository {
    async fn count_related(&self, relation: Relation, user_id: UserId) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar(relation.count_sql())
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list_related(
        &self,
        relation: Relation,
        user_id: UserId,
        offset: i64,
        limit: i64,
    ) -> DatabaseResult<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(relation.page_sql())
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}

/// Delete every edge on either side of the user; zero edges is fine
pub(crate) async fn delete_all_for_user(
    conn: &mut PgConnection,
    user_id: UserId,
) -> DatabaseResult<u64> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 OR followee_id = $1")
        .bind(user_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}
