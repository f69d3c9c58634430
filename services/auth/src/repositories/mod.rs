//! Repositories for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{NewUser, User, UserId};

pub mod user;

pub use user::UserRepository;

#[cfg(test)]
use mockall::automock;

/// Credential lookups and writes against the identity store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user; a taken email surfaces as a unique violation
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    async fn find_by_id(&self, user_id: UserId) -> DatabaseResult<Option<User>>;

    /// Replace the stored hash, reporting whether the user existed
    async fn update_password(&self, user_id: UserId, password_hash: &str) -> DatabaseResult<bool>;
}
