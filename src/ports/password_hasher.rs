//! Password hashing port.
//!
//! Hashing is CPU-bound; callers on the async runtime run it through
//! `tokio::task::spawn_blocking`.

use secrecy::SecretString;

use crate::domain::foundation::AuthError;

/// Hashes and verifies passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password into a self-describing (PHC) string.
    fn hash(&self, password: &SecretString) -> Result<String, AuthError>;

    /// Check a password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only if the hash is unusable.
    fn verify(&self, password: &SecretString, hash: &str) -> Result<bool, AuthError>;
}
