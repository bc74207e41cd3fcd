//! Global application error types and handlers.
//!
//! This module defines custom error types that are used across the entire
//! backend application and provides mechanisms for consistent error handling
//! and response formatting.
//!
//! Every variant carries a numeric code partitioned by domain: 1xxx
//! authentication, 2xxx user management, 3xxx hotel management, 4xxx
//! transactions, 5000 internal. Clients branch on the code; the message list
//! is for humans.

use crate::api::ApiResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Authentication
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Session has expired")]
    SessionExpired,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    // User management
    #[error("Account is disabled")]
    AccountDisabled,

    // Hotel management
    #[error("Task reminder not found")]
    ReminderNotFound,
    #[error("Reminder has already been dismissed")]
    ReminderAlreadyDismissed,
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },
    #[error("Reminder belongs to another user")]
    NotReminderOwner,
    #[error("Start date must be before end date")]
    InvalidDateRange,

    // Transactions
    #[error("Unknown currency code: {code}")]
    InvalidCurrency { code: String },

    // Internal
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code surfaced in the error envelope.
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidCredentials => 1001,
            Self::SessionExpired => 1002,
            Self::Unauthenticated => 1003,
            Self::Forbidden { .. } => 1004,
            Self::AccountDisabled => 2002,
            Self::ReminderNotFound => 3001,
            Self::ReminderAlreadyDismissed => 3002,
            Self::Validation { .. } => 3003,
            Self::NotReminderOwner => 3004,
            Self::InvalidDateRange => 3005,
            Self::InvalidCurrency { .. } => 4001,
            Self::Database(_) | Self::Internal(_) => 5000,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::SessionExpired | Self::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden { .. } | Self::AccountDisabled | Self::NotReminderOwner => {
                StatusCode::FORBIDDEN
            }
            Self::ReminderNotFound => StatusCode::NOT_FOUND,
            Self::ReminderAlreadyDismissed => StatusCode::CONFLICT,
            Self::Validation { .. } | Self::InvalidDateRange | Self::InvalidCurrency { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details never leave the process; the envelope carries a
        // generic message while the specifics go to the log.
        let message = match &self {
            Self::Database(err) => {
                tracing::error!(error = %err, "request failed with database error");
                "Internal server error".to_string()
            }
            Self::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed with internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = ApiResponse::<()>::error(vec![message], self.code());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_partitioned_by_domain() {
        assert_eq!(AppError::InvalidCredentials.code(), 1001);
        assert_eq!(AppError::Unauthenticated.code(), 1003);
        assert_eq!(AppError::AccountDisabled.code(), 2002);
        assert_eq!(AppError::ReminderNotFound.code(), 3001);
        assert_eq!(
            AppError::InvalidCurrency {
                code: "XYZ".into()
            }
            .code(),
            4001
        );
        assert_eq!(AppError::Internal("boom".into()).code(), 5000);
    }

    #[test]
    fn internal_errors_map_to_500_with_generic_message() {
        let err = AppError::Internal("connection pool exhausted".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // The detailed message is logged, not returned.
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn ownership_violation_is_forbidden() {
        assert_eq!(AppError::NotReminderOwner.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotReminderOwner.code(), 3004);
    }
}
