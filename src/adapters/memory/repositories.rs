//! Port implementations backed by [`InMemoryPortalStore`].

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::student::StudentProfile;
use crate::domain::user::{User, Username};
use crate::ports::{StudentProfileRepository, UserRepository};

use super::store::InMemoryPortalStore;

/// In-memory user repository.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryPortalStore,
}

impl InMemoryUserRepository {
    pub fn new(store: InMemoryPortalStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        self.store.insert_user(user).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.store.user_by_id(id).await)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        Ok(self.store.user_by_username(username).await)
    }

    async fn record_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError> {
        self.store.set_last_login(id, at).await
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.store.delete_user(id).await
    }
}

/// In-memory student profile repository.
#[derive(Debug, Clone)]
pub struct InMemoryStudentProfileRepository {
    store: InMemoryPortalStore,
}

impl InMemoryStudentProfileRepository {
    pub fn new(store: InMemoryPortalStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StudentProfileRepository for InMemoryStudentProfileRepository {
    async fn create(&self, profile: &StudentProfile) -> Result<(), DomainError> {
        self.store.insert_profile(profile).await
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StudentProfile>, DomainError> {
        Ok(self.store.profile_by_user(user_id).await)
    }
}

impl InMemoryPortalStore {
    /// Repository view over the users table.
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.clone())
    }

    /// Repository view over the student_profiles table.
    pub fn profiles(&self) -> InMemoryStudentProfileRepository {
        InMemoryStudentProfileRepository::new(self.clone())
    }
}
