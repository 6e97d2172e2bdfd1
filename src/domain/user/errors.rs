//! User-specific error types.

use thiserror::Error;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, FormErrors};

/// Errors from registration, login and session resolution.
#[derive(Debug, Clone, Error)]
pub enum UserError {
    /// Submitted form failed validation; re-render with these errors.
    #[error("Invalid form submission: {0}")]
    InvalidForm(FormErrors),

    /// Authentication or session backend failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage or other infrastructure failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl UserError {
    pub fn invalid_form(errors: FormErrors) -> Self {
        UserError::InvalidForm(errors)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::InvalidForm(_) => ErrorCode::ValidationFailed,
            UserError::Auth(AuthError::ServiceUnavailable(_)) => ErrorCode::CacheError,
            UserError::Auth(AuthError::Hashing(_)) => ErrorCode::InternalError,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Form errors to re-render, if this is a validation failure.
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            UserError::InvalidForm(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        UserError::Infrastructure(err.to_string())
    }
}
