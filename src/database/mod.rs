pub mod models;

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;

/// Connect the application pool and run any pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL is not set".into()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&url)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    info!("database pool ready ({} max connections)", config.max_connections);

    Ok(pool)
}

/// Pings the pool to ensure connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
