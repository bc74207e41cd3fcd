//! General-purpose middleware for the API.
//!
//! The error-logging middleware sits at the outer boundary: any response
//! that leaves as a server error is logged and recorded to the persistent
//! error log. Persisting the log row is best-effort; a failure there must
//! never turn a served response into another error.

use crate::database::models::ErrorLogEntry;
use crate::database::queries;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, warn};

pub async fn log_server_errors(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), "request ended in server error");

        let entry = ErrorLogEntry {
            occurred_at: Utc::now(),
            method,
            path,
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("internal error")
                .to_string(),
        };
        if let Err(e) = queries::error_log_insert(&state.db, &entry).await {
            warn!(error = %e, "failed to persist error log entry");
        }
    }

    response
}
