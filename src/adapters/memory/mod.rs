//! In-memory persistence adapters.
//!
//! Used by the test suite and HTTP tests. Enforces the same constraints as
//! the Postgres schema so behaviour matches across backends.

mod repositories;
mod store;

pub use repositories::{InMemoryStudentProfileRepository, InMemoryUserRepository};
pub use store::InMemoryPortalStore;
