//! Common library for the friend recommendation backend
//!
//! This crate provides shared functionality used by the auth and api
//! services: database connectivity and migrations, the storage error
//! taxonomy, pagination, bearer tokens, display name rules, listener settings, request ids, the
//! outer CORS and panic layers and tracing set-up.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod layers;
pub mod pagination;
pub mod request_id;
pub mod settings;
pub mod telemetry;
pub mod token;
pub mod user_name;
