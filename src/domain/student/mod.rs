//! Student module - the one-to-one academic profile extending a user.
//!
//! # Domain Invariants
//!
//! 1. Each profile belongs to exactly one user, each user has at most one profile
//! 2. `student_id` is unique across profiles
//! 3. Profiles are immutable once created
//! 4. Deleting the owning user deletes the profile

mod errors;
mod profile;

pub use errors::ProfileError;
pub use profile::{
    Gpa, Major, StudentId, StudentProfile, MAX_MAJOR_LENGTH, MAX_STUDENT_ID_LENGTH,
};
