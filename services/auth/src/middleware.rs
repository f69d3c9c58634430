//! Bearer token validation for protected routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use crate::{AppState, error::AuthError, models::UserId};

/// Verified caller, inserted into the request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AuthError::Unauthorized)?;

    let claims = state
        .auth_service
        .tokens()
        .verify(bearer.token())
        .map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            AuthError::Unauthorized
        })?;

    req.extensions_mut().insert(AuthUser { id: claims.sub });

    Ok(next.run(req).await)
}
