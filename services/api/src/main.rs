use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::timeout::TimeoutLayer;
use tracing::info;

mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;

#[cfg(test)]
mod testing;

use common::{
    database::{DatabaseConfig, health_check, init_pool, run_migrations},
    settings::ServerSettings,
    token::{TokenConfig, TokenService},
};

use crate::{repositories::Repositories, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    common::telemetry::init("api-service")?;

    info!("Starting API service");

    let settings = ServerSettings::from_env("API", 3001).context("Invalid API settings")?;
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

    let repositories = Repositories::postgres(pool.clone());
    let authenticator = Arc::new(TokenService::new(&token_config));
    let app_state = AppState::new(&repositories, authenticator).with_pool(pool);

    let cors = common::layers::cors(&settings.allowed_origins())
        .context("Invalid CORS origin in API settings")?;
    let app = routes::create_router(app_state, cors)
        .layer(TimeoutLayer::new(settings.request_timeout()));

    let addr = settings.bind_addr().context("Invalid API listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "API service listening");

    axum::serve(listener, app).await?;

    Ok(())
}
