//! LogoutUser - ends the current session.

use std::sync::Arc;

use crate::domain::user::UserError;
use crate::ports::{SessionStore, SessionToken};

/// Handler for logout. Revoking an unknown session is not an error.
pub struct LogoutUserHandler {
    sessions: Arc<dyn SessionStore>,
}

impl LogoutUserHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, session: &SessionToken) -> Result<(), UserError> {
        self.sessions.revoke(session).await?;
        tracing::info!("session revoked");
        Ok(())
    }
}
