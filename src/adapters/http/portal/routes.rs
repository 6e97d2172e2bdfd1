//! Axum router configuration for the portal.

use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::adapters::http::middleware::session_middleware;

use super::handlers::{
    create_profile, create_profile_form, health, login, login_form, logout, profile, register,
    register_form, PortalAppState,
};

/// Page routes. All of them see the session cookie.
///
/// # Routes
///
/// - `GET|POST /register/` - Account registration
/// - `GET|POST /login/` - Login form
/// - `POST /logout/` - End the session
/// - `GET|POST /create_profile/` - Student profile creation (login required)
/// - `GET /profile/` - Student profile display (login required)
pub fn portal_routes() -> Router<PortalAppState> {
    Router::new()
        .route("/register/", get(register_form).post(register))
        .route("/login/", get(login_form).post(login))
        .route("/logout/", post(logout))
        .route("/create_profile/", get(create_profile_form).post(create_profile))
        .route("/profile/", get(profile))
}

/// Complete application router with session resolution, request timeout
/// and request tracing.
///
/// `/health` sits outside the session middleware so health checks never touch the
/// session store.
pub fn portal_router(state: PortalAppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(portal_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        )))
        .route("/health", get(health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
