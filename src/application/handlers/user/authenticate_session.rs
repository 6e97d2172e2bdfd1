//! AuthenticateSession - resolves a session token to a logged-in user.

use std::sync::Arc;

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::UserError;
use crate::ports::{SessionStore, SessionToken, UserRepository};

/// Resolves session tokens for the HTTP session middleware.
///
/// Returns `Ok(None)` when the token is unknown or expired, or when its
/// user no longer exists or has been deactivated. Backend failures are
/// errors so the caller can answer with a 500 page rather than treating
/// the visitor as anonymous.
pub struct AuthenticateSessionHandler {
    sessions: Arc<dyn SessionStore>,
    users: Arc<dyn UserRepository>,
}

impl AuthenticateSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>, users: Arc<dyn UserRepository>) -> Self {
        Self { sessions, users }
    }

    pub async fn handle(
        &self,
        token: &SessionToken,
    ) -> Result<Option<AuthenticatedUser>, UserError> {
        let Some(user_id) = self.sessions.resolve(token).await? else {
            return Ok(None);
        };

        match self.users.find_by_id(&user_id).await? {
            Some(user) if user.is_active() => Ok(Some(user.to_authenticated())),
            Some(_) | None => {
                tracing::debug!(user_id = %user_id, "session user gone or inactive");
                self.sessions.revoke(token).await?;
                Ok(None)
            }
        }
    }
}
