//! StudentProfileRepository port for profile persistence.

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    student::StudentProfile,
};

/// Repository for student profiles.
///
/// # Contract
///
/// `create` performs no pre-check; the store's constraints decide:
/// - a second profile for the same user fails with `ErrorCode::DuplicateProfile`
/// - a reused student ID fails with `ErrorCode::DuplicateStudentId`
/// - an unknown owner fails with `ErrorCode::UserNotFound`
///
/// A failed `create` leaves no record behind.
#[async_trait]
pub trait StudentProfileRepository: Send + Sync {
    /// Persist a new profile.
    async fn create(&self, profile: &StudentProfile) -> Result<(), DomainError>;

    /// Find the profile owned by a user.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StudentProfile>, DomainError>;
}
