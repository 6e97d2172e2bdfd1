//! HTTP adapters - axum routes, pages and middleware.

pub mod middleware;
pub mod portal;

pub use portal::{portal_router, PortalAppState};
