//! RegisterUser - creates an account and logs the new user in.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, ErrorCode, FormErrors};
use crate::domain::user::{RegistrationForm, User, UserError, USERNAME_TAKEN};
use crate::ports::{PasswordHasher, SessionStore, SessionToken, UserRepository};

use super::password::hash_password;

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: AuthenticatedUser,
    pub session: SessionToken,
}

/// Handler for user registration.
///
/// On success the user exists with a hashed password and a fresh session
/// has been opened. On any form error nothing is created.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionStore>,
}

impl RegisterUserHandler {
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

    pub async fn handle(&self, form: RegistrationForm) -> Result<RegisterUserResult, UserError> {
        let valid = form.validate().map_err(UserError::invalid_form)?;

        if self.users.find_by_username(&valid.username).await?.is_some() {
            return Err(username_taken());
        }

        let password_hash = hash_password(&self.hasher, valid.password).await?;
        let user = User::new(valid.username, password_hash);

        // A concurrent registration can still win the unique index.
        if let Err(err) = self.users.create(&user).await {
            return Err(match err.code() {
                ErrorCode::UsernameTaken => username_taken(),
                _ => err.into(),
            });
        }

        let session = self.sessions.open(user.id()).await?;

        tracing::info!(user_id = %user.id(), username = %user.username(), "user registered");

        Ok(RegisterUserResult {
            user: user.to_authenticated(),
            session,
        })
    }
}

fn username_taken() -> UserError {
    UserError::invalid_form(FormErrors::new().with("username", USERNAME_TAKEN))
}
