//! Account deletion unit of work backed by a PostgreSQL transaction

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Postgres, Transaction};

use super::{AccountDeletion, AccountStore, follow, recommendation, user};
use crate::models::UserId;

/// Opens one transaction per account deletion
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn begin(&self) -> DatabaseResult<Box<dyn AccountDeletion>> {
        let tx = self.pool.begin().await.map_err(DatabaseError::Connection)?;
        Ok(Box::new(PgAccountDeletion { tx }))
    }
}

/// Rolls back when dropped uncommitted
struct PgAccountDeletion {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AccountDeletion for PgAccountDeletion {
    async fn delete_recommendations(&mut self, user_id: UserId) -> DatabaseResult<u64> {
        recommendation::delete_all_for_user(&mut *self.tx, user_id).await
    }

    async fn delete_follows(&mut self, user_id: UserId) -> DatabaseResult<u64> {
        follow::delete_all_for_user(&mut *self.tx, user_id).await
    }

    async fn delete_user(&mut self, user_id: UserId) -> DatabaseResult<bool> {
        user::delete_user(&mut *self.tx, user_id).await
    }

    async fn commit(self: Box<Self>) -> DatabaseResult<()> {
        self.tx.commit().await.map_err(DatabaseError::from)
    }

    async fn rollback(self: Box<Self>) -> DatabaseResult<()> {
        self.tx.rollback().await.map_err(DatabaseError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::postgres::{TestResult, cleanup, count, insert_media, insert_user, pool};
    use sqlx::PgPool;

    const FOLLOWS_SQL: &str =
        "SELECT COUNT(*) FROM follows WHERE follower_id = $1 OR followee_id = $1";
    const RECOMMENDATIONS_SQL: &str =
        "SELECT COUNT(*) FROM recommendations WHERE from_user_id = $1 OR to_user_id = $1";
    const USERS_SQL: &str = "SELECT COUNT(*) FROM users WHERE user_id = $1";

    /// `doomed` follows and is followed by `other`, and recommends both ways
    async fn seed(pool: &PgPool) -> TestResult<(UserId, UserId, i64)> {
        let doomed = insert_user(pool, "Doomed").await?;
        let other = insert_user(pool, "Other").await?;
        let media = insert_media(pool).await?;

        for (from, to) in [(doomed, other), (other, doomed)] {
            sqlx::query("INSERT INTO follows (follower_id, followee_id) VALUES ($1, $2)")
                .bind(from)
                .bind(to)
                .execute(pool)
                .await?;
            sqlx::query(
                "INSERT INTO recommendations (from_user_id, to_user_id, media_id) VALUES ($1, $2, $3)",
            )
            .bind(from)
            .bind(to)
            .bind(media)
            .execute(pool)
            .await?;
        }

        Ok((doomed, other, media))
    }

    async fn delete_everything(tx: &mut dyn AccountDeletion, user_id: UserId) -> TestResult {
        assert_eq!(tx.delete_recommendations(user_id).await?, 2);
        assert_eq!(tx.delete_follows(user_id).await?, 2);
        assert!(tx.delete_user(user_id).await?);
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn committed_deletion_leaves_no_rows_behind() -> TestResult {
        let pool = pool().await?;
        let (doomed, other, media) = seed(&pool).await?;
        let store = AccountRepository::new(pool.clone());

        let mut tx = store.begin().await?;
        delete_everything(tx.as_mut(), doomed).await?;
        tx.commit().await?;

        assert_eq!(count(&pool, FOLLOWS_SQL, doomed).await?, 0);
        assert_eq!(count(&pool, RECOMMENDATIONS_SQL, doomed).await?, 0);
        assert_eq!(count(&pool, USERS_SQL, doomed).await?, 0);
        assert_eq!(count(&pool, USERS_SQL, other).await?, 1);

        cleanup(&pool, &[doomed, other], &[media]).await
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn rollback_and_drop_keep_every_row() -> TestResult {
        let pool = pool().await?;
        let (doomed, other, media) = seed(&pool).await?;
        let store = AccountRepository::new(pool.clone());

        let mut tx = store.begin().await?;
        delete_everything(tx.as_mut(), doomed).await?;
        tx.rollback().await?;

        assert_eq!(count(&pool, FOLLOWS_SQL, doomed).await?, 2);
        assert_eq!(count(&pool, RECOMMENDATIONS_SQL, doomed).await?, 2);
        assert_eq!(count(&pool, USERS_SQL, doomed).await?, 1);

        {
            let mut tx = store.begin().await?;
            delete_everything(tx.as_mut(), doomed).await?;
        }

        assert_eq!(count(&pool, FOLLOWS_SQL, doomed).await?, 2);
        assert_eq!(count(&pool, USERS_SQL, doomed).await?, 1);

        cleanup(&pool, &[doomed, other], &[media]).await
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn user_row_cannot_go_while_edges_remain() -> TestResult {
        let pool = pool().await?;
        let (doomed, other, media) = seed(&pool).await?;
        let store = AccountRepository::new(pool.clone());

        let mut tx = store.begin().await?;
        let err = tx.delete_user(doomed).await.unwrap_err();
        assert!(err.is_foreign_key_violation(), "unexpected error: {err:?}");
        tx.rollback().await?;

        cleanup(&pool, &[doomed, other], &[media]).await
    }
}
