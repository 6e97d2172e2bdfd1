//! HTTP middleware for axum.
//!
//! - `session` - Session-cookie resolution and authentication extractors

pub mod session;

pub use session::{
    session_middleware, AuthRejection, CookieError, OptionalAuth, RequireAuth, SessionCookie,
};
