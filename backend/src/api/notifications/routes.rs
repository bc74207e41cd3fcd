//! Defines the WebSocket route for server-initiated pushes.
//!
//! Authentication happens inside the handler before the upgrade, because
//! browsers cannot attach an Authorization header to a WebSocket handshake;
//! the session token travels as a query parameter instead.

use crate::api::notifications::handlers::notifications_ws;
use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(notifications_ws))
}
