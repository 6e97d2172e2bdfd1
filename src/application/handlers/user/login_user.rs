//! LoginUser - verifies credentials and opens a session.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, FormErrors, Timestamp};
use crate::domain::user::{LoginForm, UserError, Username, INVALID_LOGIN};
use crate::ports::{PasswordHasher, SessionStore, SessionToken, UserRepository};

use super::password::verify_password;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginUserResult {
    pub user: AuthenticatedUser,
    pub session: SessionToken,
}

/// Handler for username/password login.
///
/// Unknown username, wrong password and inactive account all produce the
/// same non-field form error.
pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionStore>,
}

impl LoginUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            users,
            hasher,
            sessions,
        }
    }

    pub async fn handle(&self, form: LoginForm) -> Result<LoginUserResult, UserError> {
        form.validate().map_err(UserError::invalid_form)?;

        let username = Username::parse(form.username()).map_err(|_| invalid_login())?;
        let user = match self.users.find_by_username(&username).await? {
            Some(user) => user,
            None => {
                tracing::debug!(username = %username, "login for unknown username");
                return Err(invalid_login());
            }
        };

        let matches =
            verify_password(&self.hasher, form.password, user.password_hash().to_string()).await?;
        if !matches || !user.is_active() {
            tracing::debug!(user_id = %user.id(), "login rejected");
            return Err(invalid_login());
        }

        self.users.record_login(user.id(), Timestamp::now()).await?;
        let session = self.sessions.open(user.id()).await?;

        tracing::info!(user_id = %user.id(), "user logged in");

        Ok(LoginUserResult {
            user: user.to_authenticated(),
            session,
        })
    }
}

fn invalid_login() -> UserError {
    let mut errors = FormErrors::new();
    errors.add_non_field(INVALID_LOGIN);
    UserError::invalid_form(errors)
}
