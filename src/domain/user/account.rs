//! User account aggregate.
//!
//! Users are created by registration and never deleted through the HTTP
//! surface. Deleting a user at the storage level cascades to the student
//! profile that extends it.

use std::fmt;

use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};

use super::Username;

/// User account - identity plus password credential.
///
/// # Invariants
///
/// - `username` is unique across all users (enforced by storage)
/// - `password_hash` is a PHC-format hash, never the raw password
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: String,
    is_active: bool,
    date_joined: Timestamp,
    last_login: Option<Timestamp>,
}

impl User {
    /// Create a new active user from a validated username and a password hash.
    pub fn new(username: Username, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            username,
            password_hash,
            is_active: true,
            date_joined: Timestamp::now(),
            last_login: None,
        }
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        username: Username,
        password_hash: String,
        is_active: bool,
        date_joined: Timestamp,
        last_login: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            is_active,
            date_joined,
            last_login,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn date_joined(&self) -> &Timestamp {
        &self.date_joined
    }

    pub fn last_login(&self) -> Option<&Timestamp> {
        self.last_login.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Behavior
    // ─────────────────────────────────────────────────────────────────────────

    /// Records a successful login.
    pub fn record_login(&mut self, at: Timestamp) {
        self.last_login = Some(at);
    }

    /// Disables the account; inactive users cannot log in or hold sessions.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Identity view handed to request contexts.
    pub fn to_authenticated(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.id, self.username.as_str())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("is_active", &self.is_active)
            .field("date_joined", &self.date_joined)
            .field("last_login", &self.last_login)
            .finish()
    }
}
