//! Defines the HTTP routes for task reminders.
//!
//! Both routes sit behind the session middleware; the identity it attaches
//! scopes every operation to the caller's own reminders.

use crate::api::tasks::handlers::{dismiss_reminder, list_reminders};
use crate::auth::middleware::require_session;
use crate::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/reminders", get(list_reminders))
        .route("/reminders/{id}/dismiss", post(dismiss_reminder))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
