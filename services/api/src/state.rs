//! Application state shared across handlers

use sqlx::PgPool;
use std::sync::Arc;

use crate::{middleware::Authenticator, repositories::Repositories, services::Services};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub authenticator: Arc<dyn Authenticator>,
    /// Pinged by `/health`; absent in tests that run without a database
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(repos: &Repositories, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            services: Services::new(repos),
            authenticator,
            db_pool: None,
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
