//! Recommendation authorization workflow and ledger views
//!
//! Creation runs an ordered list of checks and stops at the first failure:
//! both users exist, the media exists, the users are friends, the triple
//! is not yet in the ledger. Nothing is written until every check passes.
//! Two concurrent requests for the same triple can both pass the existence
//! check; the ledger's unique constraint rejects the loser, which is
//! reported as `AlreadyRecommended` like any other duplicate.

use common::error::DatabaseError;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{ServiceError, ServiceResult, ensure_positive};
use crate::{
    models::{
        MediaId, RecommendationId, UserId,
        recommendation::{Direction, RecommendationDetails},
    },
    repositories::{FriendshipOracle, MediaLookup, RecommendationLedger, UserExistenceChecker},
};

#[derive(Clone)]
pub struct RecommendationService {
    users: Arc<dyn UserExistenceChecker>,
    media: Arc<dyn MediaLookup>,
    friendships: Arc<dyn FriendshipOracle>,
    ledger: Arc<dyn RecommendationLedger>,
}

impl RecommendationService {
    pub fn new(
        users: Arc<dyn UserExistenceChecker>,
        media: Arc<dyn MediaLookup>,
        friendships: Arc<dyn FriendshipOracle>,
        ledger: Arc<dyn RecommendationLedger>,
    ) -> Self {
        Self {
            users,
            media,
            friendships,
            ledger,
        }
    }

    pub async fn create(
        &self,
        from_user_id: UserId,
        to_user_id: UserId,
        media_id: MediaId,
    ) -> ServiceResult<RecommendationId> {
        ensure_positive("from_user_id", from_user_id)?;
        ensure_positive("to_user_id", to_user_id)?;
        ensure_positive("media_id", media_id)?;

        for user_id in [from_user_id, to_user_id] {
            let exists = self
                .users
                .user_exists(user_id)
                .await
                .inspect_err(|e| error!(user_id, error = %e, "Failed to check user"))?;
            if !exists {
                return Err(ServiceError::TargetUserNotFound);
            }
        }

        let media_exists = self
            .media
            .media_exists(media_id)
            .await
            .inspect_err(|e| error!(media_id, error = %e, "Failed to check media"))?;
        if !media_exists {
            return Err(ServiceError::MediaNotFound);
        }

        let friends = self
            .friendships
            .are_friends(from_user_id, to_user_id)
            .await
            .inspect_err(|e| {
                error!(from_user_id, to_user_id, error = %e, "Failed to evaluate friendship")
            })?;
        if !friends {
            return Err(ServiceError::NotFriends);
        }

        let duplicate = self
            .ledger
            .exists(from_user_id, to_user_id, media_id)
            .await
            .inspect_err(|e| {
                error!(from_user_id, to_user_id, media_id, error = %e, "Failed to check ledger")
            })?;
        if duplicate {
            return Err(ServiceError::AlreadyRecommended);
        }

        match self.ledger.create(from_user_id, to_user_id, media_id).await {
            Ok(recommendation_id) => {
                info!(
                    recommendation_id,
                    from_user_id, to_user_id, media_id, "Recommendation created"
                );
                Ok(recommendation_id)
            }
            Err(DatabaseError::UniqueViolation(_)) => {
                warn!(
                    from_user_id,
                    to_user_id, media_id, "Concurrent duplicate recommendation rejected"
                );
                Err(ServiceError::AlreadyRecommended)
            }
            Err(e) => {
                error!(
                    from_user_id,
                    to_user_id,
                    media_id,
                    error = %e,
                    "Failed to create recommendation"
                );
                Err(e.into())
            }
        }
    }

    pub async fn list(
        &self,
        user_id: UserId,
        direction: Direction,
    ) -> ServiceResult<Vec<RecommendationDetails>> {
        ensure_positive("user_id", user_id)?;

        let listed = match direction {
            Direction::Sent => self.ledger.list_sent(user_id).await,
            Direction::Received => self.ledger.list_received(user_id).await,
        };

        listed
            .inspect_err(|e| error!(user_id, ?direction, error = %e, "Failed to list recommendations"))
            .map_err(ServiceError::from)
    }

    /// Only the sender may delete a recommendation
    pub async fn delete(
        &self,
        requester_id: UserId,
        recommendation_id: RecommendationId,
    ) -> ServiceResult<()> {
        ensure_positive("recommendation_id", recommendation_id)?;

        let recommendation = self
            .ledger
            .find(recommendation_id)
            .await
            .inspect_err(|e| error!(recommendation_id, error = %e, "Failed to load recommendation"))?
            .ok_or(ServiceError::RecommendationNotFound)?;

        if recommendation.from_user_id != requester_id {
            warn!(
                recommendation_id,
                requester_id, "Rejected deletion by non-author"
            );
            return Err(ServiceError::NotRecommendationAuthor);
        }

        let deleted = self
            .ledger
            .delete(recommendation_id)
            .await
            .inspect_err(|e| error!(recommendation_id, error = %e, "Failed to delete recommendation"))?;
        if !deleted {
            return Err(ServiceError::RecommendationNotFound);
        }

        info!(recommendation_id, requester_id, "Recommendation deleted");
        Ok(())
    }
}
