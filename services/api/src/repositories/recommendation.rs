//! Recommendation ledger repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};
use tracing::{debug, error};

use super::RecommendationLedger;
use crate::models::{
    MediaId, RecommendationId, UserId,
    media::MediaItem,
    recommendation::{Recommendation, RecommendationDetails},
    user::UserSummary,
};

const SENT_SQL: &str = r#"
    SELECT r.recommendation_id, r.created_at,
           m.media_id, m.item_type, m.name, m.year, m.author, m.created_at AS media_created_at,
           u.user_id, u.user_name, u.created_at AS user_created_at
    FROM recommendations r
    JOIN media_items m ON m.media_id = r.media_id
    JOIN users u ON u.user_id = r.to_user_id
    WHERE r.from_user_id = $1
    ORDER BY r.created_at DESC, r.recommendation_id DESC
"#;

const RECEIVED_SQL: &str = r#"
    SELECT r.recommendation_id, r.created_at,
           m.media_id, m.item_type, m.name, m.year, m.author, m.created_at AS media_created_at,
           u.user_id, u.user_name, u.created_at AS user_created_at
    FROM recommendations r
    JOIN media_items m ON m.media_id = r.media_id
    JOIN users u ON u.user_id = r.from_user_id
    WHERE r.to_user_id = $1
    ORDER BY r.created_at DESC, r.recommendation_id DESC
"#;

/// Recommendation repository
#[derive(Clone)]
pub struct RecommendationRepository {
    pool: PgPool,
}

impl RecommendationRepository {
    /// Create a new recommendation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_details(
        &self,
        sql: &'static str,
        user_id: UserId,
    ) -> DatabaseResult<Vec<RecommendationDetails>> {
        let rows = sqlx::query(sql).bind(user_id).fetch_all(&self.pool).await?;

        rows.iter()
            .map(details_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(DatabaseError::from)
    }
}

fn details_from_row(row: &PgRow) -> Result<RecommendationDetails, sqlx::Error> {
    Ok(RecommendationDetails {
        recommendation_id: row.try_get("recommendation_id")?,
        media: MediaItem {
            media_id: row.try_get("media_id")?,
            media_type: row.try_get("item_type")?,
            name: row.try_get("name")?,
            year: row.try_get("year")?,
            author: row.try_get("author")?,
            created_at: row.try_get("media_created_at")?,
        },
        user: UserSummary {
            user_id: row.try_get("user_id")?,
            user_name: row.try_get("user_name")?,
            created_at: row.try_get("user_created_at")?,
        },
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl RecommendationLedger for RecommendationRepository {
    async fn exists(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
        media_id: MediaId,
    ) -> DatabaseResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM recommendations
                WHERE from_user_id = $1 AND to_user_id = $2 AND media_id = $3
            )
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(media_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
        media_id: MediaId,
    ) -> DatabaseResult<RecommendationId> {
        debug!(from_user_id, to_user_id, media_id, "Creating recommendation");

        let id: Option<RecommendationId> = sqlx::query_scalar(
            r#"
            INSERT INTO recommendations (from_user_id, to_user_id, media_id)
            VALUES ($1, $2, $3)
            RETURNING recommendation_id
            "#,
        )
        .bind(from_user_id)
        .bind(to_user_id)
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        id.ok_or_else(|| {
            error!(
                from_user_id,
                to_user_id, media_id, "Recommendation insert returned no row"
            );
            DatabaseError::NoRowsAffected("create_recommendation")
        })
    }

    async fn list_sent(&self, user_id: UserId) -> DatabaseResult<Vec<RecommendationDetails>> {
        self.list_details(SENT_SQL, user_id).await
    }

    async fn list_received(&self, user_id: UserId) -> DatabaseResult<Vec<RecommendationDetails>> {
        self.list_details(RECEIVED_SQL, user_id).await
    }

    async fn find(
        &self,
        recommendation_id: RecommendationId,
    ) -> DatabaseResult<Option<Recommendation>> {
        let recommendation = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT recommendation_id, from_user_id, to_user_id, media_id, created_at
            FROM recommendations
            WHERE recommendation_id = $1
            "#,
        )
        .bind(recommendation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(recommendation)
    }

    async fn delete(&self, recommendation_id: RecommendationId) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM recommendations WHERE recommendation_id = $1")
            .bind(recommendation_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Delete every recommendation the user sent or received
pub(crate) async fn delete_all_for_user(
    conn: &mut PgConnection,
    user_id: UserId,
) -> DatabaseResult<u64> {
    let result =
        sqlx::query("DELETE FROM recommendations WHERE from_user_id = $1 OR to_user_id = $1")
            .bind(user_id)
            .execute(conn)
            .await?;

    Ok(result.rows_affected())
}
