//! API service routes

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use common::{
    layers,
    pagination::{PageQuery, PageRequest},
    request_id::{self, make_span},
};

use crate::{
    error::ApiResult,
    middleware::auth_middleware,
    services::ServiceError,
    state::AppState,
};

pub mod follows;
pub mod media;
pub mod recommendations;
pub mod users;

/// Create the router for the API service
///
/// `cors` wraps everything so preflights never reach authentication.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let protected_routes = Router::new()
        .route("/users/:id/recommendations", get(recommendations::list_for_user))
        .route("/follows", post(follows::create_follow))
        .route("/follows/:target", delete(follows::delete_follow))
        .route("/recommendations", post(recommendations::create_recommendation))
        .route(
            "/me",
            get(users::get_me)
                .patch(users::update_me)
                .delete(users::delete_me),
        )
        .route("/me/friends", get(follows::my_friends))
        .route("/me/followers", get(follows::my_followers))
        .route("/me/followings", get(follows::my_followings))
        .route("/me/followers/:follower", delete(follows::remove_follower))
        .route("/me/recommendations", get(recommendations::list_mine))
        .route(
            "/me/recommendations/:id",
            delete(recommendations::delete_recommendation),
        )
        .route("/media", get(media::search_media))
        .route("/media/:id", get(media::get_media_item))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id/friends", get(follows::user_friends))
        .route("/users/:id/followers", get(follows::user_followers))
        .route("/users/:id/followings", get(follows::user_followings))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(middleware::from_fn(request_id::middleware))
        .layer(layers::catch_panic())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.db_pool {
        Some(pool) => match common::database::health_check(pool).await {
            Ok(true) => "ok",
            Ok(false) | Err(_) => {
                warn!("Database health check failed");
                "unavailable"
            }
        },
        None => "not configured",
    };

    let status = if database == "unavailable" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ok" } else { "degraded" },
            "service": "api-service",
            "database": database,
        })),
    )
}

/// Validate `?page=&limit=`, applying the defaults
pub(crate) fn page_request(
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<PageRequest> {
    let Query(query) = query?;
    Ok(PageRequest::try_from(query).map_err(ServiceError::from)?)
}
