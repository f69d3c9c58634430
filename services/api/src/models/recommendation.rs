//! Recommendation ledger models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use super::{MediaId, RecommendationId, UserId, media::MediaItem, user::UserSummary};

/// A stored recommendation edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Recommendation {
    pub recommendation_id: RecommendationId,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub media_id: MediaId,
    pub created_at: DateTime<Utc>,
}

/// A recommendation joined with its media item and the counterpart user
///
/// For the sent view `user` is the receiver; for the received view it is
/// the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationDetails {
    pub recommendation_id: RecommendationId,
    pub media: MediaItem,
    pub user: UserSummary,
    pub created_at: DateTime<Utc>,
}

/// Which side of the ledger to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    Sent,
    #[default]
    Received,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sent" => Ok(Direction::Sent),
            "received" | "" => Ok(Direction::Received),
            other => Err(format!(
                "invalid direction '{other}': expected 'sent' or 'received'"
            )),
        }
    }
}

/// Query parameters for recommendation listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationQuery {
    pub direction: Option<String>,
}

/// Request for creating a recommendation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecommendationRequest {
    pub to_user_id: UserId,
    pub media_id: MediaId,
}

/// Response for a created recommendation
#[derive(Debug, Clone, Serialize)]
pub struct CreatedRecommendation {
    pub recommendation_id: RecommendationId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_defaults_to_received() {
        assert_eq!(Direction::default(), Direction::Received);
        assert_eq!("".parse::<Direction>(), Ok(Direction::Received));
        assert_eq!("SENT".parse::<Direction>(), Ok(Direction::Sent));
        assert!("both".parse::<Direction>().is_err());
    }
}
