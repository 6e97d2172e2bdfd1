//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - User accounts
//! - `StudentProfileRepository` - Student profiles
//!
//! ## Authentication Ports
//!
//! - `SessionStore` - Server-side login sessions
//! - `PasswordHasher` - Password hashing and verification

mod password_hasher;
mod session_store;
mod student_profile_repository;
mod user_repository;

pub use password_hasher::PasswordHasher;
pub use session_store::{SessionStore, SessionToken};
pub use student_profile_repository::StudentProfileRepository;
pub use user_repository::UserRepository;
