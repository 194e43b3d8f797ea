use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state: the connection pool and the immutable startup
/// configuration. Cloned per request by axum.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
