//! Authentication adapters.
//!
//! - `Argon2PasswordHasher` - Argon2id implementation of `PasswordHasher`

mod argon2_hasher;

pub use argon2_hasher::Argon2PasswordHasher;
