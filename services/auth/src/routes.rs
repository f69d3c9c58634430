//! Authentication service routes

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use common::{
    layers,
    request_id::{self, make_span},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    AppState,
    error::AuthResult,
    middleware::{AuthUser, auth_middleware},
    models::{ChangePasswordRequest, LoginRequest, RegisterRequest, TokenResponse, UserResponse},
};

/// Create the router for the authentication service
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let protected_routes = Router::new()
        .route("/me/password", put(change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(middleware::from_fn(request_id::middleware))
        .layer(layers::catch_panic())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<UserResponse>)> {
    let Json(payload) = payload?;

    let user = state
        .auth_service
        .register(&payload.user_name, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>> {
    let Json(payload) = payload?;

    let token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<StatusCode> {
    let Json(payload) = payload?;
    info!(user_id = user.id, "Password change request");

    state
        .auth_service
        .change_password(user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
