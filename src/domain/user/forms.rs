//! Registration and login forms.
//!
//! Forms accept raw submitted values and either produce validated,
//! save-ready values or a [`FormErrors`] collection for re-rendering.
//! Checks that need storage (username already taken) are added by the
//! application handlers on top of these.

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{FormErrors, ValidationError};

use super::Username;

pub const FIELD_REQUIRED: &str = "This field is required.";
pub const USERNAME_INVALID: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";
pub const INVALID_LOGIN: &str = "Please enter a correct username and password.";

/// Raw registration submission.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub username: String,
    pub password: SecretString,
    /// Confirmation is checked only when the client sends a non-blank value.
    pub password_confirm: Option<SecretString>,
}

/// Registration values that passed form validation.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub username: Username,
    pub password: SecretString,
}

impl RegistrationForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        password_confirm: Option<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
            password_confirm: password_confirm.map(SecretString::new),
        }
    }

    /// Validates every field, collecting all errors rather than stopping at
    /// the first one.
    pub fn validate(self) -> Result<ValidRegistration, FormErrors> {
        let mut errors = FormErrors::new();

        let username = match Username::parse(&self.username) {
            Ok(username) => Some(username),
            Err(err) => {
                errors.add("username", username_message(&err));
                None
            }
        };

        let password = self.password.expose_secret();
        if password.is_empty() {
            errors.add("password", FIELD_REQUIRED);
        } else if let Some(confirm) = self
            .password_confirm
            .as_ref()
            .filter(|confirm| !confirm.expose_secret().is_empty())
        {
            if confirm.expose_secret() != password {
                errors.add("password_confirm", PASSWORD_MISMATCH);
            }
        }

        errors.into_result()?;
        match username {
            Some(username) => Ok(ValidRegistration {
                username,
                password: self.password,
            }),
            None => Err(FormErrors::new().with("username", FIELD_REQUIRED)),
        }
    }
}

/// Raw login submission.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Checks presence only; credential checks happen against storage.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        if self.username.trim().is_empty() {
            errors.add("username", FIELD_REQUIRED);
        }
        if self.password.expose_secret().is_empty() {
            errors.add("password", FIELD_REQUIRED);
        }
        errors.into_result()
    }

    pub fn username(&self) -> &str {
        self.username.trim()
    }
}

fn username_message(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyField { .. } => FIELD_REQUIRED.to_string(),
        ValidationError::TooLong { max, actual, .. } => format!(
            "Ensure this value has at most {} characters (it has {}).",
            max, actual
        ),
        ValidationError::InvalidFormat { .. } => USERNAME_INVALID.to_string(),
    }
}
