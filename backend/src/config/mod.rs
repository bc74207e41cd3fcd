//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, reminder polling schedule, and session
//! lifetime. Values come from environment variables with logged defaults;
//! the database URL may also be supplied as a mounted secret file.

use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub max_db_connections: u32,
    /// Allowed CORS origin for the front end; `None` disables CORS headers.
    pub cors_origin: Option<String>,
    pub session_ttl_minutes: i64,
    pub reminder_interval_secs: u64,
    pub reminder_jitter_percent: f64,
    /// When disabled, reminder batches go to the log sink instead of the
    /// WebSocket hub.
    pub realtime_push_enabled: bool,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("TOURGO_PORT", "8080"),
            database_url: load_database_url(),
            max_db_connections: try_load("TOURGO_DB_MAX_CONNECTIONS", "10"),
            cors_origin: var("TOURGO_CORS_ORIGIN").ok(),
            session_ttl_minutes: try_load("TOURGO_SESSION_TTL_MINUTES", "60"),
            reminder_interval_secs: try_load("TOURGO_REMINDER_INTERVAL_SECS", "60"),
            reminder_jitter_percent: try_load("TOURGO_REMINDER_JITTER_PERCENT", "0.1"),
            realtime_push_enabled: try_load("TOURGO_REALTIME_PUSH_ENABLED", "true"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| ())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|()| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// The database URL is a secret; prefer the mounted secret file, fall back to
/// the plain environment variable for local development.
fn load_database_url() -> String {
    if let Ok(url) = read_secret("TOURGO_DATABASE_URL") {
        return url;
    }
    var("DATABASE_URL")
        .map_err(|()| {
            warn!("Neither the TOURGO_DATABASE_URL secret nor DATABASE_URL is set");
        })
        .expect("Database misconfigured!")
}

fn read_secret(secret_name: &str) -> Result<String, ()> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|_| ())
}
