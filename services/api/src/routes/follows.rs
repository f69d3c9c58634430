//! Follow graph handlers and relationship listings

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use common::pagination::{PageQuery, Paginated};

use super::page_request;
use crate::{
    error::ApiResult,
    middleware::AuthUser,
    models::{CreateFollowRequest, StatusResponse, UserId, user::UserSummary},
    repositories::Relation,
    state::AppState,
};

/// Follow another user
pub async fn create_follow(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateFollowRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    state
        .services
        .follows
        .follow(user.id, payload.to_user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "following",
        }),
    ))
}

/// Stop following a user
pub async fn delete_follow(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    target: Result<Path<UserId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(target) = target?;
    state.services.follows.unfollow(user.id, target).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Make a follower stop following the current user
pub async fn remove_follower(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    follower: Result<Path<UserId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(follower) = follower?;
    state
        .services
        .follows
        .remove_follower(user.id, follower)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn listing(
    state: &AppState,
    relation: Relation,
    user_id: UserId,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Paginated<UserSummary>>> {
    let page = page_request(query)?;
    let users = state.services.follows.list(relation, user_id, page).await?;

    Ok(Json(users))
}

pub async fn user_friends(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    listing(&state, Relation::Friends, id, query).await
}

pub async fn user_followers(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    listing(&state, Relation::Followers, id, query).await
}

pub async fn user_followings(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    listing(&state, Relation::Followings, id, query).await
}

pub async fn my_friends(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    listing(&state, Relation::Friends, user.id, query).await
}

pub async fn my_followers(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    listing(&state, Relation::Followers, user.id, query).await
}

pub async fn my_followings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    listing(&state, Relation::Followings, user.id, query).await
}
