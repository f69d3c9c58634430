//! Repositories for database operations
//!
//! Each trait is the narrow read/write surface one consumer needs. The
//! PostgreSQL implementations live in the submodules; services only ever
//! hold `Arc<dyn Trait>` handles.

use async_trait::async_trait;
use common::error::DatabaseResult;
use std::sync::Arc;

use crate::models::{
    MediaId, RecommendationId, UserId,
    media::{MediaItem, MediaType},
    recommendation::{Recommendation, RecommendationDetails},
    user::{UserProfile, UserSummary},
};

pub mod account;
pub mod follow;
pub mod media;
pub mod recommendation;
pub mod user;

#[cfg(test)]
use mockall::automock;

/// Existence lookups against the identity store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserExistenceChecker: Send + Sync {
    async fn user_exists(&self, user_id: UserId) -> DatabaseResult<bool>;
}

/// Identity store reads and the one profile write the api owns
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> DatabaseResult<Option<UserSummary>>;

    async fn find_profile(&self, user_id: UserId) -> DatabaseResult<Option<UserProfile>>;

    async fn count_users(&self) -> DatabaseResult<i64>;

    /// Users ordered by display name, then id
    async fn list_users(&self, offset: i64, limit: i64) -> DatabaseResult<Vec<UserSummary>>;

    async fn update_name(&self, user_id: UserId, user_name: &str)
    -> DatabaseResult<Option<UserProfile>>;
}

/// Writes on the directed follow edges
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FollowGraph: Send + Sync {
    /// Insert `follower -> followee`; a duplicate surfaces as a unique violation
    async fn create_follow(&self, follower_id: UserId, followee_id: UserId) -> DatabaseResult<()>;

    /// Remove `follower -> followee`, reporting whether a row matched
    async fn delete_follow(&self, follower_id: UserId, followee_id: UserId)
    -> DatabaseResult<bool>;
}

/// The symmetric friendship predicate
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FriendshipOracle: Send + Sync {
    /// True iff both `a -> b` and `b -> a` exist, read in one statement
    async fn are_friends(&self, a: UserId, b: UserId) -> DatabaseResult<bool>;
}

/// The user sets derived from the follow edges of one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Mutual follows
    Friends,
    /// Users following the subject
    Followers,
    /// Users the subject follows
    Followings,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Friends => "friends",
            Relation::Followers => "followers",
            Relation::Followings => "followings",
        }
    }
}

/// Count-then-fetch queries backing the relationship listings
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RelationshipQuery: Send + Sync {
    async fn count_related(&self, relation: Relation, user_id: UserId) -> DatabaseResult<i64>;

    /// One page of related users ordered by display name, then id
    async fn list_related(
        &self,
        relation: Relation,
        user_id: UserId,
        offset: i64,
        limit: i64,
    ) -> DatabaseResult<Vec<UserSummary>>;
}

/// Existence lookup against the media catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaLookup: Send + Sync {
    async fn media_exists(&self, media_id: MediaId) -> DatabaseResult<bool>;
}

/// Read-only media catalog
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    async fn find_media(&self, media_id: MediaId) -> DatabaseResult<Option<MediaItem>>;

    async fn search_media(
        &self,
        media_type: Option<MediaType>,
        name: Option<String>,
        limit: i64,
    ) -> DatabaseResult<Vec<MediaItem>>;
}

/// The recommendation ledger
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecommendationLedger: Send + Sync {
    async fn exists(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
        media_id: MediaId,
    ) -> DatabaseResult<bool>;

    /// Insert the edge and return its id; zero rows is an error, not a no-op
    async fn create(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
        media_id: MediaId,
    ) -> DatabaseResult<RecommendationId>;

    /// Recommendations sent by the user, newest first
    async fn list_sent(&self, user_id: UserId) -> DatabaseResult<Vec<RecommendationDetails>>;

    /// Recommendations received by the user, newest first
    async fn list_received(&self, user_id: UserId) -> DatabaseResult<Vec<RecommendationDetails>>;

    async fn find(
        &self,
        recommendation_id: RecommendationId,
    ) -> DatabaseResult<Option<Recommendation>>;

    async fn delete(&self, recommendation_id: RecommendationId) -> DatabaseResult<bool>;
}

/// Opens account-deletion units of work
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn begin(&self) -> DatabaseResult<Box<dyn AccountDeletion>>;
}

/// A scoped transaction over the three stores a user appears in
///
/// Nothing is visible to other readers until `commit`. Dropping the unit
/// of work without committing, including when the owning future is
/// cancelled, discards every staged deletion.
#[async_trait]
pub trait AccountDeletion: Send {
    /// Delete recommendations sent or received by the user
    async fn delete_recommendations(&mut self, user_id: UserId) -> DatabaseResult<u64>;

    /// Delete follow edges on either side of the user
    async fn delete_follows(&mut self, user_id: UserId) -> DatabaseResult<u64>;

    /// Delete the user row, reporting whether it existed
    async fn delete_user(&mut self, user_id: UserId) -> DatabaseResult<bool>;

    async fn commit(self: Box<Self>) -> DatabaseResult<()>;

    async fn rollback(self: Box<Self>) -> DatabaseResult<()>;
}

/// Every repository handle the services are built from
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserDirectory>,
    pub user_checker: Arc<dyn UserExistenceChecker>,
    pub follows: Arc<dyn FollowGraph>,
    pub friendships: Arc<dyn FriendshipOracle>,
    pub relations: Arc<dyn RelationshipQuery>,
    pub media: Arc<dyn MediaCatalog>,
    pub media_lookup: Arc<dyn MediaLookup>,
    pub ledger: Arc<dyn RecommendationLedger>,
    pub accounts: Arc<dyn AccountStore>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        let users = Arc::new(user::UserRepository::new(pool.clone()));
        let follows = Arc::new(follow::FollowRepository::new(pool.clone()));
        let media = Arc::new(media::MediaRepository::new(pool.clone()));

        Self {
            users: users.clone(),
            user_checker: users,
            follows: follows.clone(),
            friendships: follows.clone(),
            relations: follows,
            media: media.clone(),
            media_lookup: media,
            ledger: Arc::new(recommendation::RecommendationRepository::new(pool.clone())),
            accounts: Arc::new(account::AccountRepository::new(pool)),
        }
    }
}
