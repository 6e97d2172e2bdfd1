//! Session store port for server-side login sessions.
//!
//! A session maps an opaque token (carried in the session cookie) to the
//! user it was opened for. Implementations exist for Redis (production)
//! and in-memory (development, tests).
//!
//! # Contract
//!
//! Implementations must:
//! - Generate unguessable tokens in `open`
//! - Store only a digest of the token, never the token itself
//! - Return `Ok(None)` from `resolve` for unknown, revoked or expired tokens
//! - Make `revoke` idempotent
//! - Return `AuthError::ServiceUnavailable` for backend failures

use async_trait::async_trait;
use std::fmt;

use crate::domain::foundation::{AuthError, UserId};

/// Opaque session token as carried by the client.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// Server-side session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a new session for a user and return its token.
    async fn open(&self, user_id: &UserId) -> Result<SessionToken, AuthError>;

    /// Look up the user a token belongs to.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, AuthError>;

    /// End a session. Unknown tokens are ignored.
    async fn revoke(&self, token: &SessionToken) -> Result<(), AuthError>;
}
