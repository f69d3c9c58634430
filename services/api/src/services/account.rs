//! Account deletion as one atomic unit of work

use common::error::DatabaseResult;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{ServiceError, ServiceResult};
use crate::{
    models::UserId,
    repositories::{AccountDeletion, AccountStore},
};

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

struct Removed {
    recommendations: u64,
    follows: u64,
    user: bool,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Remove the user with every recommendation and follow edge naming them
    ///
    /// All three deletions commit together or not at all. A missing user
    /// rolls back and reports `UserNotFound`.
    pub async fn delete_account(&self, user_id: UserId) -> ServiceResult<()> {
        let mut unit = self
            .accounts
            .begin()
            .await
            .inspect_err(|e| error!(user_id, error = %e, "Failed to open account deletion"))?;

        match stage(unit.as_mut(), user_id).await {
            Ok(removed) if removed.user => {
                unit.commit()
                    .await
                    .inspect_err(|e| error!(user_id, error = %e, "Failed to commit account deletion"))?;
                info!(
                    user_id,
                    recommendations = removed.recommendations,
                    follows = removed.follows,
                    "Account deleted"
                );
                Ok(())
            }
            Ok(_) => {
                unit.rollback().await?;
                warn!(user_id, "Account deletion for missing user");
                Err(ServiceError::UserNotFound)
            }
            Err(e) => {
                error!(user_id, error = %e, "Account deletion failed, rolling back");
                if let Err(rollback) = unit.rollback().await {
                    error!(user_id, error = %rollback, "Rollback failed");
                }
                Err(e.into())
            }
        }
    }
}

async fn stage(unit: &mut dyn AccountDeletion, user_id: UserId) -> DatabaseResult<Removed> {
    let recommendations = unit.delete_recommendations(user_id).await?;
    let follows = unit.delete_follows(user_id).await?;
    let user = unit.delete_user(user_id).await?;

    Ok(Removed {
        recommendations,
        follows,
        user,
    })
}
