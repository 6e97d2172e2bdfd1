//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `user` - User accounts, registration and login forms
//! - `student` - Student profile aggregate

pub mod foundation;
pub mod student;
pub mod user;
