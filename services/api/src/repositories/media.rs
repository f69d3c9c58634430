//! Media repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{MediaCatalog, MediaLookup};
use crate::models::{
    MediaId,
    media::{MediaItem, MediaType},
};

/// Media repository for database operations
#[derive(Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    /// Create a new media repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaLookup for MediaRepository {
    async fn media_exists(&self, media_id: MediaId) -> DatabaseResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM media_items WHERE media_id = $1)")
                .bind(media_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

#[async_trait]
impl MediaCatalog for MediaRepository {
    async fn find_media(&self, media_id: MediaId) -> DatabaseResult<Option<MediaItem>> {
        let item = sqlx::query_as::<_, MediaItem>(
            r#"
            SELECT media_id, item_type, name, year, author, created_at
            FROM media_items
            WHERE media_id = $1
            "#,
        )
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn search_media(
        &self,
        media_type: Option<MediaType>,
        name: Option<String>,
        limit: i64,
    ) -> DatabaseResult<Vec<MediaItem>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT media_id, item_type, name, year, author, created_at FROM media_items WHERE TRUE",
        );

        if let Some(media_type) = media_type {
            query.push(" AND item_type = ").push_bind(media_type);
        }

        if let Some(name) = name {
            query
                .push(" AND name ILIKE ")
                .push_bind(format!("%{}%", escape_like(&name)));
        }

        query
            .push(" ORDER BY name ASC, media_id ASC LIMIT ")
            .push_bind(limit);

        let items = query
            .build_query_as::<MediaItem>()
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }
}

/// Escape LIKE wildcards so user input only ever matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
