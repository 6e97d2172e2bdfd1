//! Session token generation and digesting.

use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::ports::SessionToken;

const TOKEN_BYTES: usize = 32;

/// Generate a fresh random session token (64 hex chars).
pub fn generate() -> SessionToken {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    SessionToken::new(to_hex(&bytes))
}

/// Storage key for a token. Stores never keep the raw token.
pub fn digest(token: &SessionToken) -> String {
    to_hex(&Sha256::digest(token.as_str().as_bytes()))
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
