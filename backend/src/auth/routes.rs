//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle staff login and logout. They are designed to be
//! nested under `/api/auth` in the main Axum router.

use crate::auth::handlers::{login, logout};
use crate::state::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}
