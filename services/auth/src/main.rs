use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

mod error;
mod middleware;
mod models;
mod password;
mod repositories;
mod routes;
mod service;
mod validation;

use common::{
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
    settings::ServerSettings,
    token::{TokenConfig, TokenService},
};

use crate::{password::CredentialHasher, repositories::UserRepository, service::AuthService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
}

#[tokio::main]
async fn main() -> Result<()> {
    common::telemetry::init("auth-service")?;

    info!("Starting authentication service");

    let settings = ServerSettings::from_env("AUTH", 3000).context("Invalid auth settings")?;
    let db_config = DatabaseConfig::from_env()?;
    let token_config = TokenConfig::from_env()?;

    // Initialize database connection pool
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let user_repository = Arc::new(UserRepository::new(pool));
    let auth_service = AuthService::new(
        user_repository,
        CredentialHasher::new(),
        TokenService::new(&token_config),
    );

    info!("Authentication service initialized successfully");

    let cors = common::layers::cors(&settings.allowed_origins())
        .context("Invalid CORS origin in auth settings")?;
    let app = routes::create_router(AppState { auth_service }, cors)
        .layer(TimeoutLayer::new(settings.request_timeout()));

    let addr = settings.bind_addr().context("Invalid auth listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Authentication service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
