//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Argon2id password hashing
//! - `http` - axum routes and server-rendered pages
//! - `memory` - In-memory repositories for development and tests
//! - `postgres` - PostgreSQL repositories (sqlx)
//! - `sessions` - Session stores (Redis, in-memory)

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod sessions;
