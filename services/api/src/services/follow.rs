//! Follow graph workflows and paginated relationship listings

use common::{
    error::DatabaseError,
    pagination::{PageRequest, Paginated},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::{ServiceError, ServiceResult, ensure_positive};
use crate::{
    models::{UserId, user::UserSummary},
    repositories::{
        FollowGraph, FriendshipOracle, Relation, RelationshipQuery, UserExistenceChecker,
    },
};

#[derive(Clone)]
pub struct FollowService {
    users: Arc<dyn UserExistenceChecker>,
    follows: Arc<dyn FollowGraph>,
    friendships: Arc<dyn FriendshipOracle>,
    relations: Arc<dyn RelationshipQuery>,
}

impl FollowService {
    pub fn new(
        users: Arc<dyn UserExistenceChecker>,
        follows: Arc<dyn FollowGraph>,
        friendships: Arc<dyn FriendshipOracle>,
        relations: Arc<dyn RelationshipQuery>,
    ) -> Self {
        Self {
            users,
            follows,
            friendships,
            relations,
        }
    }

    /// `follower` starts following `followee`
    ///
    /// Duplicates are detected by the storage constraint, not pre-checked.
    pub async fn follow(&self, follower_id: UserId, followee_id: UserId) -> ServiceResult<()> {
        ensure_positive("to_user_id", followee_id)?;
        if follower_id == followee_id {
            return Err(ServiceError::CannotFollowSelf);
        }

        match self.follows.create_follow(follower_id, followee_id).await {
            Ok(()) => {
                info!(follower_id, followee_id, "Follow created");
                Ok(())
            }
            Err(DatabaseError::UniqueViolation(_)) => {
                debug!(follower_id, followee_id, "Follow already exists");
                Err(ServiceError::DuplicateEdge)
            }
            Err(DatabaseError::ForeignKeyViolation(_)) => {
                warn!(follower_id, followee_id, "Follow references a missing user");
                Err(ServiceError::UserNotFound)
            }
            Err(DatabaseError::CheckViolation(_)) => Err(ServiceError::CannotFollowSelf),
            Err(e) => {
                error!(follower_id, followee_id, error = %e, "Failed to create follow");
                Err(e.into())
            }
        }
    }

    /// Remove `follower -> followee`
    pub async fn unfollow(&self, follower_id: UserId, followee_id: UserId) -> ServiceResult<()> {
        ensure_positive("user_id", followee_id)?;

        let removed = self
            .follows
            .delete_follow(follower_id, followee_id)
            .await
            .inspect_err(
                |e| error!(follower_id, followee_id, error = %e, "Failed to delete follow"),
            )?;

        if !removed {
            return Err(ServiceError::EdgeNotFound);
        }

        info!(follower_id, followee_id, "Follow deleted");
        Ok(())
    }

    /// Drop the edge `follower -> me`
    pub async fn remove_follower(&self, me: UserId, follower_id: UserId) -> ServiceResult<()> {
        ensure_positive("follower_id", follower_id)?;
        self.unfollow(follower_id, me).await
    }

    pub async fn are_friends(&self, a: UserId, b: UserId) -> ServiceResult<bool> {
        self.friendships
            .are_friends(a, b)
            .await
            .inspect_err(|e| error!(a, b, error = %e, "Failed to evaluate friendship"))
            .map_err(ServiceError::from)
    }

    /// One page of `relation` for `user_id`
    ///
    /// Counts first and returns an empty page without fetching when the
    /// count is zero. Pages past the end are empty, not errors.
    pub async fn list(
        &self,
        relation: Relation,
        user_id: UserId,
        page: PageRequest,
    ) -> ServiceResult<Paginated<UserSummary>> {
        ensure_positive("user_id", user_id)?;

        let exists = self
            .users
            .user_exists(user_id)
            .await
            .inspect_err(|e| error!(user_id, error = %e, "Failed to check user"))?;
        if !exists {
            return Err(ServiceError::UserNotFound);
        }

        let total = self
            .relations
            .count_related(relation, user_id)
            .await
            .inspect_err(|e| {
                error!(user_id, relation = relation.as_str(), error = %e, "Failed to count relation")
            })?;

        if total == 0 {
            return Ok(Paginated::empty(page));
        }

        let data = self
            .relations
            .list_related(relation, user_id, page.offset(), i64::from(page.limit()))
            .await
            .inspect_err(|e| {
                error!(user_id, relation = relation.as_str(), error = %e, "Failed to list relation")
            })?;

        Ok(Paginated::new(data, total, page))
    }
}
