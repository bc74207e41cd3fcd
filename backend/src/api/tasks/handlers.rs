//! Handler functions for the task-reminder API.
//!
//! These functions read the caller's identity from the request extension the
//! auth middleware attached, delegate to `services::reminders`, and shape the
//! uniform envelope.

use crate::api::ApiResponse;
use crate::auth::models::CurrentUser;
use crate::database::models::TaskReminder;
use crate::errors::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

/// `GET /api/tasks/reminders` — the caller's open reminders.
pub async fn list_reminders(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<TaskReminder>>, AppError> {
    let reminders = state.reminders.for_user(user.id).await?;
    Ok(Json(ApiResponse::items(reminders)))
}

/// `POST /api/tasks/reminders/{id}/dismiss` — owner-only dismissal.
pub async fn dismiss_reminder(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(reminder_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.reminders.dismiss(reminder_id, &user).await?;
    Ok(Json(ApiResponse::ok()))
}
