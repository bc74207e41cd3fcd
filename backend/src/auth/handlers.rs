//! Handler functions for authentication-related API endpoints.
//!
//! These functions process login and logout requests, validate input at the
//! request-model boundary, and delegate to `auth::service` for the core
//! session logic.

use crate::api::ApiResponse;
use crate::auth::middleware::bearer_token;
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::errors::AppError;
use crate::state::AppState;
use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    payload.validate()?;

    let session = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(ApiResponse::item(session.into())))
}

/// Revokes the caller's session. Idempotent: logging out with a missing or
/// already-revoked token still answers with a success envelope.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ApiResponse<()>> {
    if let Some(token) = bearer_token(&headers) {
        state.auth.logout(token).await;
    }
    Json(ApiResponse::ok())
}
