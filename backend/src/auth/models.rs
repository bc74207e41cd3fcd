//! Data structures for authentication-related entities.
//!
//! This module defines the login request/response models, the in-memory
//! session record, and the identity attached to authenticated requests.

use crate::errors::AppError;
use crate::utils::validate_required;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required("email", &self.email)?;
        validate_required("password", &self.password)?;
        if !self.email.contains('@') {
            return Err(AppError::Validation {
                field: "email".to_string(),
                reason: "must be an email address".to_string(),
            });
        }
        Ok(())
    }
}

/// A live session held in the expiring session store, keyed by its token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Wire representation of the signed-in user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

impl From<Session> for LoginResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
            user: SessionUser {
                id: session.user_id,
                email: session.email,
                display_name: session.display_name,
                role: session.role,
            },
        }
    }
}

/// Identity of the caller, inserted as a request extension by the auth
/// middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_requires_well_formed_email() {
        let request = LoginRequest {
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.code(), 3003);
    }

    #[test]
    fn login_request_rejects_blank_password() {
        let request = LoginRequest {
            email: "staff@tourgo.example".into(),
            password: "  ".into(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn valid_login_request_passes() {
        let request = LoginRequest {
            email: "staff@tourgo.example".into(),
            password: "secret".into(),
        };
        assert!(request.validate().is_ok());
    }
}
