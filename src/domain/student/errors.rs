//! Student-profile-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Errors from creating or displaying a student profile.
///
/// Duplicate and missing profiles are explicit conditions so the HTTP layer
/// can give them their own status codes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// No profile exists for the user.
    #[error("No student profile exists for user {0}")]
    NotFound(UserId),

    /// The user already owns a profile (unique user constraint).
    #[error("User {0} already has a student profile")]
    DuplicateProfile(UserId),

    /// Another profile already holds this student ID (unique constraint).
    #[error("Student ID '{0}' is already in use")]
    DuplicateStudentId(String),

    /// A raw value could not be coerced into its stored type.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    /// Storage or other infrastructure failure.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ProfileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProfileError::NotFound(_) => ErrorCode::ProfileNotFound,
            ProfileError::DuplicateProfile(_) => ErrorCode::DuplicateProfile,
            ProfileError::DuplicateStudentId(_) => ErrorCode::DuplicateStudentId,
            ProfileError::InvalidField { .. } => ErrorCode::ValidationFailed,
            ProfileError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for ProfileError {
    fn from(err: ValidationError) -> Self {
        ProfileError::InvalidField {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<DomainError> for ProfileError {
    fn from(err: DomainError) -> Self {
        ProfileError::Infrastructure(err.to_string())
    }
}
