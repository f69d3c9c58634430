//! Business workflows composed from the repository traits
//!
//! Services own no state. Each one holds only the narrow collaborators it
//! reads or writes, and reports outcomes through [`ServiceError`] so the
//! HTTP layer can map every kind to a distinct response.

use common::{error::DatabaseError, pagination::PageError};
use thiserror::Error;

use crate::repositories::Repositories;

pub mod account;
pub mod follow;
pub mod media;
pub mod recommendation;
pub mod user;

pub use account::AccountService;
pub use follow::FollowService;
pub use media::MediaService;
pub use recommendation::RecommendationService;
pub use user::UserService;

/// Business outcome of a workflow
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User not found")]
    UserNotFound,

    #[error("Target user not found")]
    TargetUserNotFound,

    #[error("Media not found")]
    MediaNotFound,

    #[error("Follow relationship not found")]
    EdgeNotFound,

    #[error("Recommendation not found")]
    RecommendationNotFound,

    #[error("Already following this user")]
    DuplicateEdge,

    #[error("Users are not friends")]
    NotFriends,

    #[error("Media already recommended to this user")]
    AlreadyRecommended,

    #[error("Only the sender can delete a recommendation")]
    NotRecommendationAuthor,

    #[error("Users cannot follow themselves")]
    CannotFollowSelf,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    InvalidPage(#[from] PageError),

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

/// Coarse classification used at the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Validation,
    Storage,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::UserNotFound
            | ServiceError::TargetUserNotFound
            | ServiceError::MediaNotFound
            | ServiceError::EdgeNotFound
            | ServiceError::RecommendationNotFound => ErrorKind::NotFound,
            ServiceError::DuplicateEdge
            | ServiceError::NotFriends
            | ServiceError::AlreadyRecommended => ErrorKind::Conflict,
            ServiceError::NotRecommendationAuthor => ErrorKind::Forbidden,
            ServiceError::CannotFollowSelf
            | ServiceError::Validation(_)
            | ServiceError::InvalidPage(_) => ErrorKind::Validation,
            ServiceError::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Reject ids that can never name a stored row
pub(crate) fn ensure_positive(field: &str, id: i64) -> ServiceResult<()> {
    if id <= 0 {
        return Err(ServiceError::Validation(format!(
            "'{field}' must be a positive integer"
        )));
    }
    Ok(())
}

/// Every workflow, wired from one set of repositories
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub follows: FollowService,
    pub media: MediaService,
    pub recommendations: RecommendationService,
    pub accounts: AccountService,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            follows: FollowService::new(
                repos.user_checker.clone(),
                repos.follows.clone(),
                repos.friendships.clone(),
                repos.relations.clone(),
            ),
            media: MediaService::new(repos.media.clone()),
            recommendations: RecommendationService::new(
                repos.user_checker.clone(),
                repos.media_lookup.clone(),
                repos.friendships.clone(),
                repos.ledger.clone(),
            ),
            accounts: AccountService::new(repos.accounts.clone()),
        }
    }
}
