//! Authentication types for the domain layer.
//!
//! These types represent a user whose session has been resolved. They have
//! **no storage dependencies** - any session backend (Redis, in-memory) can
//! produce them via the `SessionStore` port.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after resolving the session cookie:
//! let user = AuthenticatedUser::new(user_id, "alice");
//!
//! // Wrap in a request context for handlers to use
//! request.extensions_mut().insert(RequestContext::new(user));
//! ```

use super::UserId;
use thiserror::Error;

/// A user whose identity was established by a valid session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account identifier.
    pub id: UserId,

    /// Login name, shown on rendered pages.
    pub username: String,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// Failures of the authentication machinery itself.
///
/// Bad credentials and unknown sessions are not errors: login reports them
/// as form errors and session resolution as an anonymous visitor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Hashing or verifying a password failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// The session backend is unavailable (network, config, etc.).
    #[error("Session store unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}
