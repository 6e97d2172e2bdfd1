//! In-memory relational store for users and student profiles.
//!
//! Mirrors the constraints declared in `migrations/`:
//! - `users.username` unique
//! - `student_profiles.user_id` unique, references `users(id)` ON DELETE CASCADE
//! - `student_profiles.student_id` unique
//!
//! Both tables sit behind one lock so constraint checks and writes are
//! atomic, the way a single-row INSERT is in Postgres.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, StudentProfileId, Timestamp, UserId};
use crate::domain::student::StudentProfile;
use crate::domain::user::{User, Username};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    profiles: HashMap<StudentProfileId, StudentProfile>,
}

/// Shared in-memory store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortalStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryPortalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn profile_count(&self) -> usize {
        self.tables.read().await.profiles.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // users
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) async fn insert_user(&self, user: &User) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if tables.users.contains_key(user.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("duplicate key value violates users_pkey: {}", user.id()),
            ));
        }
        if tables
            .users
            .values()
            .any(|existing| existing.username() == user.username())
        {
            return Err(DomainError::new(
                ErrorCode::UsernameTaken,
                format!("Username already taken: {}", user.username()),
            )
            .with_detail("username", user.username().as_str()));
        }

        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }

    pub(super) async fn user_by_id(&self, id: &UserId) -> Option<User> {
        self.tables.read().await.users.get(id).cloned()
    }

    pub(super) async fn user_by_username(&self, username: &Username) -> Option<User> {
        self.tables
            .read()
            .await
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned()
    }

    pub(super) async fn set_last_login(&self, id: &UserId, at: Timestamp) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(id) {
            Some(user) => {
                user.record_login(at);
                Ok(())
            }
            None => Err(user_not_found(id)),
        }
    }

    /// Deletes a user and cascades to its profile.
    pub(super) async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(id).is_none() {
            return Err(user_not_found(id));
        }
        tables.profiles.retain(|_, profile| profile.user_id() != id);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // student_profiles
    // ─────────────────────────────────────────────────────────────────────────

    pub(super) async fn insert_profile(&self, profile: &StudentProfile) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(profile.user_id()) {
            return Err(user_not_found(profile.user_id()));
        }
        if tables
            .profiles
            .values()
            .any(|existing| existing.user_id() == profile.user_id())
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateProfile,
                format!("User already has a student profile: {}", profile.user_id()),
            )
            .with_detail("user_id", profile.user_id().to_string()));
        }
        if tables
            .profiles
            .values()
            .any(|existing| existing.student_id() == profile.student_id())
        {
            return Err(DomainError::new(
                ErrorCode::DuplicateStudentId,
                format!("Student ID already in use: {}", profile.student_id()),
            )
            .with_detail("student_id", profile.student_id().as_str()));
        }

        tables.profiles.insert(*profile.id(), profile.clone());
        Ok(())
    }

    pub(super) async fn profile_by_user(&self, user_id: &UserId) -> Option<StudentProfile> {
        self.tables
            .read()
            .await
            .profiles
            .values()
            .find(|profile| profile.user_id() == user_id)
            .cloned()
    }
}

fn user_not_found(id: &UserId) -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", id))
        .with_detail("user_id", id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User::new(Username::parse(name).unwrap(), "hash".to_string())
    }

    fn profile(user_id: UserId, student_id: &str) -> StudentProfile {
        StudentProfile::from_submission(user_id, Some(student_id), Some("CS"), Some("3.5"))
            .unwrap()
    }

    #[tokio::test]
    async fn username_is_unique() {
        let store = InMemoryPortalStore::new();
        store.insert_user(&user("alice")).await.unwrap();

        let err = store.insert_user(&user("alice")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::UsernameTaken);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn one_profile_per_user() {
        let store = InMemoryPortalStore::new();
        let alice = user("alice");
        store.insert_user(&alice).await.unwrap();
        store.insert_profile(&profile(*alice.id(), "S1")).await.unwrap();

        let err = store
            .insert_profile(&profile(*alice.id(), "S2"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DuplicateProfile);
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn student_id_is_unique_across_users() {
        let store = InMemoryPortalStore::new();
        let alice = user("alice");
        let bob = user("bob");
        store.insert_user(&alice).await.unwrap();
        store.insert_user(&bob).await.unwrap();
        store.insert_profile(&profile(*alice.id(), "S12345")).await.unwrap();

        let err = store
            .insert_profile(&profile(*bob.id(), "S12345"))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DuplicateStudentId);
        assert_eq!(err.detail("student_id"), Some("S12345"));
        assert!(store.profile_by_user(bob.id()).await.is_none());
    }

    #[tokio::test]
    async fn profile_requires_existing_user() {
        let store = InMemoryPortalStore::new();
        let err = store
            .insert_profile(&profile(UserId::new(), "S1"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn deleting_user_cascades_to_profile() {
        let store = InMemoryPortalStore::new();
        let alice = user("alice");
        let bob = user("bob");
        store.insert_user(&alice).await.unwrap();
        store.insert_user(&bob).await.unwrap();
        store.insert_profile(&profile(*alice.id(), "S1")).await.unwrap();
        store.insert_profile(&profile(*bob.id(), "S2")).await.unwrap();

        store.delete_user(alice.id()).await.unwrap();

        assert!(store.profile_by_user(alice.id()).await.is_none());
        assert!(store.profile_by_user(bob.id()).await.is_some());
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn student_id_is_reusable_after_cascade() {
        let store = InMemoryPortalStore::new();
        let alice = user("alice");
        store.insert_user(&alice).await.unwrap();
        store.insert_profile(&profile(*alice.id(), "S1")).await.unwrap();
        store.delete_user(alice.id()).await.unwrap();

        let bob = user("bob");
        store.insert_user(&bob).await.unwrap();
        assert!(store.insert_profile(&profile(*bob.id(), "S1")).await.is_ok());
    }
}
