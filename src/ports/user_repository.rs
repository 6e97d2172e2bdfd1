//! UserRepository port for account persistence.

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, Timestamp, UserId},
    user::{User, Username},
};

/// Repository for user accounts.
///
/// # Contract
///
/// Implementations must:
/// - Enforce username uniqueness, failing `create` with `ErrorCode::UsernameTaken`
/// - Cascade `delete` to the user's student profile
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError>;

    /// Record a successful login time.
    async fn record_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError>;

    /// Delete a user and, by cascade, its student profile.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
