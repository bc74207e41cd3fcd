//! Module for database connection setup and common utilities.
//!
//! This module is responsible for initializing the MySQL connection pool and
//! providing a central point for database-related configuration. All data
//! access goes through the stored-procedure wrappers in `queries`; the
//! procedure bodies are owned by the database, not this codebase.

pub mod models;
pub mod queries;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

/// Opens the connection pool and verifies the database answers before the
/// server starts taking traffic.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!(max_connections, "database pool ready");

    Ok(pool)
}
