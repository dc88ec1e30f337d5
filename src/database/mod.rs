use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config;

pub mod models;
pub mod repository;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Create the shared connection pool from `DATABASE_URL`.
///
/// Connections are established lazily so the server can start (and report a
/// degraded health status) before the database is reachable.
pub fn connect_lazy() -> Result<PgPool, DatabaseError> {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        warn!("DATABASE_URL not set, falling back to local default");
        "postgres://postgres@localhost:5432/sonidox".to_string()
    });

    let cfg = &config::config().database;
    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .connect_lazy(&url)?;

    info!("Database pool configured (max_connections={})", cfg.max_connections);
    Ok(pool)
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
