//! Sliding-window session validation.
//!
//! Sessions are stateless: the token itself carries `last_activity`, and every successful
//! validation hands back a freshly stamped token. There is no absolute lifetime cap, so
//! whoever holds a valid token can keep the session alive by using it before each window
//! closes.

use chrono::{DateTime, TimeDelta, Utc};

use crate::token::{SessionCodec, TokenError};

/// Default inactivity window (30 minutes).
pub const DEFAULT_INACTIVITY_LIMIT: TimeDelta = TimeDelta::minutes(30);

/// A validated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Username the session belongs to.
    pub subject: String,
    /// Replacement token stamped with the validation time. Callers must hand it back to
    /// the client.
    pub refreshed_token: String,
}

/// Errors returned by [`SessionManager::validate`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No token, or one that failed signature/format checks.
    #[error("unauthenticated")]
    Unauthenticated,
    /// Authentic token whose inactivity gap exceeded the limit. Callers should discard
    /// the session and raise the short-lived expiry marker.
    #[error("session expired")]
    Expired,
    #[error(transparent)]
    Signing(TokenError),
}

#[derive(Debug, Clone)]
pub struct SessionManager {
    codec: SessionCodec,
    inactivity_limit: TimeDelta,
}

impl SessionManager {
    pub fn new(codec: SessionCodec, inactivity_limit: TimeDelta) -> Self {
        Self {
            codec,
            inactivity_limit,
        }
    }

    pub fn inactivity_limit(&self) -> TimeDelta {
        self.inactivity_limit
    }

    /// Start a session for `subject`. Call only after successful authentication.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.codec.issue(subject, now)
    }

    /// Validate `token` against the current time and refresh it.
    pub fn validate(&self, token: &str) -> Result<Session, SessionError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate `token` as of `now`: authentic, carrying `last_activity`, and used within
    /// the inactivity limit. A gap of exactly the limit is still accepted.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Session, SessionError> {
        let claims = self
            .codec
            .decode(token)
            .map_err(|_| SessionError::Unauthenticated)?;
        if claims.sub.is_empty() {
            return Err(SessionError::Unauthenticated);
        }

        let last_activity = claims.last_activity.ok_or(SessionError::Expired)?;
        if now - last_activity > self.inactivity_limit {
            tracing::debug!(subject = %claims.sub, %last_activity, "session expired");
            return Err(SessionError::Expired);
        }

        let refreshed_token = self
            .codec
            .issue(&claims.sub, now)
            .map_err(SessionError::Signing)?;
        Ok(Session {
            subject: claims.sub,
            refreshed_token,
        })
    }
}
