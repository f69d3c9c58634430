//! Recommendation handlers

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::ApiResult,
    middleware::AuthUser,
    models::{
        RecommendationId, UserId,
        recommendation::{
            CreateRecommendationRequest, CreatedRecommendation, Direction, RecommendationDetails,
            RecommendationQuery,
        },
    },
    services::ServiceError,
    state::AppState,
};

/// Recommend a media item to a friend
pub async fn create_recommendation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateRecommendationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let recommendation_id = state
        .services
        .recommendations
        .create(user.id, payload.to_user_id, payload.media_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedRecommendation { recommendation_id }),
    ))
}

async fn listing(
    state: &AppState,
    user_id: UserId,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<RecommendationDetails>>> {
    let Query(query) = query?;
    let direction = query
        .direction
        .as_deref()
        .unwrap_or_default()
        .parse::<Direction>()
        .map_err(ServiceError::Validation)?;

    let recommendations = state
        .services
        .recommendations
        .list(user_id, direction)
        .await?;

    Ok(Json(recommendations))
}

pub async fn list_mine(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    listing(&state, user.id, query).await
}

pub async fn list_for_user(
    State(state): State<AppState>,
    id: Result<Path<UserId>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    listing(&state, id, query).await
}

/// Delete a recommendation the current user sent
pub async fn delete_recommendation(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    id: Result<Path<RecommendationId>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    state.services.recommendations.delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
