//! Error types specific to the authentication flow.
//!
//! These are folded into the global `AppError` taxonomy at the handler
//! boundary so every rejection leaves the process with an authentication
//! domain code.

use crate::errors::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is disabled")]
    AccountDisabled,
    #[error("session is unknown or expired")]
    SessionExpired,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::AccountDisabled => AppError::AccountDisabled,
            AuthError::SessionExpired => AppError::SessionExpired,
            AuthError::Database(e) => AppError::Database(e),
        }
    }
}
