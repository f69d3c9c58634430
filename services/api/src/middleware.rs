//! Bearer authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use common::token::{TokenError, TokenService};
use tracing::debug;

use crate::{error::ApiError, models::UserId, state::AppState};

/// Turns a bearer credential into a verified user id
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<UserId, TokenError>;
}

impl Authenticator for TokenService {
    fn authenticate(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify(token).map(|claims| claims.sub)
    }
}

/// Authenticated user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
}

/// Reject requests without a valid bearer token
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let id = state
        .authenticator
        .authenticate(bearer.token())
        .map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            ApiError::Unauthorized
        })?;

    req.extensions_mut().insert(AuthUser { id });

    Ok(next.run(req).await)
}
