//! Core business logic for the authentication system.
//!
//! This service verifies credentials through the stored-procedure layer,
//! issues UUID session tokens held in the expiring session store, and
//! resolves bearer tokens for the middleware. Passwords cross the procedure
//! boundary as SHA-256 hex digests, never in the clear.

use crate::auth::errors::AuthError;
use crate::auth::models::Session;
use crate::cache::ExpiringMap;
use crate::database::queries;
use chrono::{TimeDelta, Utc};
use sha2::{Digest, Sha256};
use sqlx::MySqlPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct AuthService {
    pool: MySqlPool,
    sessions: ExpiringMap<Session>,
    session_ttl: TimeDelta,
}

impl AuthService {
    pub fn new(pool: MySqlPool, session_ttl_minutes: i64) -> Self {
        Self {
            pool,
            sessions: ExpiringMap::new(),
            session_ttl: TimeDelta::minutes(session_ttl_minutes),
        }
    }

    /// Verifies credentials and opens a new session. Each login purges
    /// expired sessions opportunistically; the store has no other sweeper.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let purged = self.sessions.purge_expired().await;
        if purged > 0 {
            debug!(purged, "evicted expired sessions");
        }

        let digest = password_digest(password);
        let user = queries::user_verify_credentials(&self.pool, email, &digest)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.is_active {
            warn!(user = user.id, "login attempt on disabled account");
            return Err(AuthError::AccountDisabled);
        }

        let issued_at = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            issued_at,
            expires_at: issued_at + self.session_ttl,
        };
        self.sessions
            .insert(session.token.clone(), session.clone(), self.session_ttl)
            .await;

        info!(user = session.user_id, "session opened");
        Ok(session)
    }

    /// Resolves a bearer token to its session. Unknown and expired tokens
    /// are indistinguishable to the caller.
    pub async fn resolve(&self, token: &str) -> Result<Session, AuthError> {
        self.sessions
            .get(token)
            .await
            .ok_or(AuthError::SessionExpired)
    }

    /// Revokes a session. Revoking an unknown token is a no-op.
    pub async fn logout(&self, token: &str) {
        if self.sessions.remove(token).await.is_some() {
            debug!("session revoked");
        }
    }
}

/// SHA-256 hex digest handed to the credential-check procedure.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_is_sha256_hex() {
        assert_eq!(
            password_digest("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn password_digest_is_deterministic_and_fixed_width() {
        let a = password_digest("front-desk-4");
        let b = password_digest("front-desk-4");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, password_digest("front-desk-5"));
    }
}
