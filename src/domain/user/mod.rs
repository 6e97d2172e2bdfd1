//! User module - accounts, registration and login.
//!
//! # Domain Invariants
//!
//! 1. Usernames are unique (enforced by storage, surfaced as a form error)
//! 2. Passwords are only ever persisted as Argon2id hashes
//! 3. Inactive users cannot log in or hold sessions

mod account;
mod errors;
mod forms;
mod username;

pub use account::User;
pub use errors::UserError;
pub use forms::{
    LoginForm, RegistrationForm, ValidRegistration, FIELD_REQUIRED, INVALID_LOGIN,
    PASSWORD_MISMATCH, USERNAME_INVALID, USERNAME_TAKEN,
};
pub use username::{Username, MAX_USERNAME_LENGTH};
