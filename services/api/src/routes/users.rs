//! User directory and `/me` handlers

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use common::pagination::PageQuery;

use super::page_request;
use crate::{
    error::ApiResult,
    middleware::AuthUser,
    models::{UpdateUserRequest, UserId},
    state::AppState,
};

/// Get all users, one page at a time
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let page = page_request(query)?;
    let users = state.services.users.list_users(page).await?;

    Ok(Json(users))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    let user = state.services.users.get_user(id).await?;

    Ok(Json(user))
}

pub async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let profile = state.services.users.get_profile(user.id).await?;

    Ok(Json(profile))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let profile = state
        .services
        .users
        .update_name(user.id, &payload.user_name)
        .await?;

    Ok(Json(profile))
}

/// Delete the current account with all its follows and recommendations
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    state.services.accounts.delete_account(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
