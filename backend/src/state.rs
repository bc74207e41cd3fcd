//! Shared application state handed to every handler.
//!
//! Owns the database pool, the authentication service with its session
//! store, the reminder service, and the notification hub. Built once at
//! startup and shared behind an `Arc`.

use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database;
use crate::services::reminders::ReminderService;
use notify::Hub;
use sqlx::MySqlPool;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub db: MySqlPool,
    pub auth: AuthService,
    pub reminders: Arc<ReminderService>,
    pub hub: Arc<Hub>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Arc<Self>, sqlx::Error> {
        let db = database::connect(&config.database_url, config.max_db_connections).await?;
        let auth = AuthService::new(db.clone(), config.session_ttl_minutes);
        let reminders = Arc::new(ReminderService::with_pool(db.clone()));
        let hub = Arc::new(Hub::new());

        Ok(Arc::new(Self {
            config,
            db,
            auth,
            reminders,
            hub,
        }))
    }
}
