//! API models for request and response payloads

use serde::{Deserialize, Serialize};

pub mod media;
pub mod recommendation;
pub mod user;

/// Identifier of a row in `users`
pub type UserId = i64;

/// Identifier of a row in `media_items`
pub type MediaId = i64;

/// Identifier of a row in `recommendations`
pub type RecommendationId = i64;

/// Request for following another user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFollowRequest {
    pub to_user_id: UserId,
}

/// Request for renaming the current user
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub user_name: String,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
