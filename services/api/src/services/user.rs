//! Identity store reads and profile updates

use common::{
    pagination::{PageRequest, Paginated},
    user_name::normalize_user_name,
};
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{ServiceError, ServiceResult, ensure_positive};
use crate::{
    models::{
        UserId,
        user::{UserProfile, UserSummary},
    },
    repositories::UserDirectory,
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserDirectory>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<UserSummary> {
        ensure_positive("user_id", user_id)?;

        self.users
            .find_by_id(user_id)
            .await
            .inspect_err(|e| error!(user_id, error = %e, "Failed to load user"))?
            .ok_or(ServiceError::UserNotFound)
    }

    pub async fn get_profile(&self, user_id: UserId) -> ServiceResult<UserProfile> {
        self.users
            .find_profile(user_id)
            .await
            .inspect_err(|e| error!(user_id, error = %e, "Failed to load profile"))?
            .ok_or(ServiceError::UserNotFound)
    }

    /// All users, two-step count then page
    pub async fn list_users(&self, page: PageRequest) -> ServiceResult<Paginated<UserSummary>> {
        let total = self
            .users
            .count_users()
            .await
            .inspect_err(|e| error!(error = %e, "Failed to count users"))?;

        if total == 0 {
            return Ok(Paginated::empty(page));
        }

        let data = self
            .users
            .list_users(page.offset(), i64::from(page.limit()))
            .await
            .inspect_err(|e| error!(error = %e, "Failed to list users"))?;

        debug!(total, page = page.page(), returned = data.len(), "Listed users");
        Ok(Paginated::new(data, total, page))
    }

    pub async fn update_name(&self, user_id: UserId, user_name: &str) -> ServiceResult<UserProfile> {
        let user_name =
            normalize_user_name(user_name).map_err(|e| ServiceError::Validation(e.to_string()))?;

        let profile = self
            .users
            .update_name(user_id, &user_name)
            .await
            .inspect_err(|e| error!(user_id, error = %e, "Failed to rename user"))?
            .ok_or(ServiceError::UserNotFound)?;

        info!(user_id, "User renamed");
        Ok(profile)
    }
}
