//! Request-scoped context for authenticated handlers.
//!
//! The HTTP session middleware resolves the session cookie once per request
//! and builds a `RequestContext`. Application handlers that act on behalf of
//! the logged-in user take the context as an explicit argument instead of
//! reading identity from ambient state.
//!
//! ```text
//! cookie → session_middleware → RequestContext (request extensions)
//!                                       ↓
//!                  RequireAuth extractor → handler.handle(cmd, &ctx)
//! ```

use uuid::Uuid;

use super::{AuthenticatedUser, UserId};

/// Identity and tracing context for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The user the request acts for.
    user: AuthenticatedUser,

    /// Links log lines emitted while serving one request.
    correlation_id: String,
}

impl RequestContext {
    /// Creates a context for the given user with a fresh correlation ID.
    pub fn new(user: AuthenticatedUser) -> Self {
        Self {
            user,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Builder: override the generated correlation ID.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}

#[cfg(test)]
impl RequestContext {
    /// Creates a context for a fresh user. Only available in test builds.
    pub fn test_fixture(username: &str) -> Self {
        Self::new(AuthenticatedUser::new(UserId::new(), username))
            .with_correlation_id("test-correlation-id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_correlation_id() {
        let user = AuthenticatedUser::new(UserId::new(), "alice");
        let a = RequestContext::new(user.clone());
        let b = RequestContext::new(user);

        assert!(!a.correlation_id().is_empty());
        assert_ne!(a.correlation_id(), b.correlation_id());
    }

    #[test]
    fn accessors_expose_user() {
        let id = UserId::new();
        let ctx = RequestContext::new(AuthenticatedUser::new(id, "bob"))
            .with_correlation_id("corr-1");

        assert_eq!(ctx.user_id(), &id);
        assert_eq!(ctx.username(), "bob");
        assert_eq!(ctx.correlation_id(), "corr-1");
    }
}
