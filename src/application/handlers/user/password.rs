//! Runs password hashing off the async runtime.

use secrecy::SecretString;
use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::ports::PasswordHasher;

pub(crate) async fn hash_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: SecretString,
) -> Result<String, AuthError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::Hashing(format!("hashing task failed: {}", e)))?
}

pub(crate) async fn verify_password(
    hasher: &Arc<dyn PasswordHasher>,
    password: SecretString,
    hash: String,
) -> Result<bool, AuthError> {
    let hasher = Arc::clone(hasher);
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(format!("verification task failed: {}", e)))?
}
