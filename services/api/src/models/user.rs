//! User projections served by the api service

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::UserId;

/// Public view of a user, safe to show to anyone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserSummary {
    pub user_id: UserId,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
}

/// The current user's own view, including the login identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserProfile {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserSummary {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            user_name: profile.user_name,
            created_at: profile.created_at,
        }
    }
}
