//! Session-cookie middleware and extractors for axum.
//!
//! - `session_middleware` - resolves the session cookie into a `RequestContext`
//! - `RequireAuth` - extractor that redirects anonymous visitors to the login page
//! - `OptionalAuth` - extractor for pages that render for anyone
//!
//! ```text
//! Request → session_middleware → RequestContext in extensions
//!                                      ↓
//!                              RequireAuth(ctx) → handler.handle(cmd, &ctx)
//! ```
//!
//! A cookie that no longer resolves (expired, revoked, user gone) is
//! treated as anonymous and cleared on the way out.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::http::portal::{internal_error, PortalAppState};
use crate::domain::foundation::RequestContext;
use crate::ports::SessionToken;

// ════════════════════════════════════════════════════════════════════════════════
// Session cookie
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
#[error("invalid session cookie: {0}")]
pub struct CookieError(String);

/// Attributes of the session cookie.
///
/// Always `HttpOnly`, `SameSite=Lax` and `Path=/`; `Secure` when configured.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    max_age: Duration,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, max_age: Duration, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age,
            secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie carrying a freshly opened session.
    pub fn issue(&self, token: &SessionToken) -> Result<Cookie<'static>, CookieError> {
        self.build(token.as_str(), self.max_age.as_secs())
    }

    /// Cookie that makes the browser drop the session cookie.
    pub fn clear(&self) -> Result<Cookie<'static>, CookieError> {
        self.build("", 0)
    }

    fn build(&self, value: &str, max_age_secs: u64) -> Result<Cookie<'static>, CookieError> {
        let secure = if self.secure { "; Secure" } else { "" };
        let raw = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
            self.name, value, max_age_secs, secure
        );
        Cookie::parse(raw).map_err(|e| CookieError(e.to_string()))
    }

    /// Token presented by the client, if any.
    pub fn token_from(&self, jar: &CookieJar) -> Option<SessionToken> {
        jar.get(&self.name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .map(SessionToken::new)
    }

    fn is_set_by(&self, response: &Response) -> bool {
        let prefix = format!("{}=", self.name);
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .any(|value| value.to_str().map_or(false, |v| v.starts_with(&prefix)))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Middleware
// ════════════════════════════════════════════════════════════════════════════════

/// Resolves the session cookie and injects a `RequestContext`.
///
/// Requests without a cookie pass through untouched. A session backend
/// failure ends the request with a 500 page rather than silently logging
/// the visitor out.
pub async fn session_middleware(
    State(state): State<PortalAppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = state.cookie.token_from(&jar) else {
        return next.run(request).await;
    };

    match state.authenticate_session_handler().handle(&token).await {
        Ok(Some(user)) => {
            let ctx = RequestContext::new(user);
            tracing::debug!(
                user_id = %ctx.user_id(),
                correlation_id = ctx.correlation_id(),
                "session resolved"
            );
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        Ok(None) => {
            let mut response = next.run(request).await;
            if !state.cookie.is_set_by(&response) {
                match state.cookie.clear().map(|c| HeaderValue::from_str(&c.to_string())) {
                    Ok(Ok(value)) => {
                        response.headers_mut().append(header::SET_COOKIE, value);
                    }
                    _ => tracing::warn!("could not build session clearing cookie"),
                }
            }
            response
        }
        Err(err) => {
            tracing::error!(error = %err, "session lookup failed");
            internal_error(&state.pages, None)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Extractors
// ════════════════════════════════════════════════════════════════════════════════

/// Extractor that requires a logged-in user.
///
/// Anonymous requests are redirected to `/login/?next=<path>`.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| AuthRejection::LoginRequired {
                next: parts.uri.path().to_string(),
            })
    }
}

/// Extractor for pages that render with or without a session.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<RequestContext>);

impl OptionalAuth {
    pub fn username(&self) -> Option<&str> {
        self.0.as_ref().map(RequestContext::username)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<RequestContext>().cloned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No valid session; carries the path to return to after login.
    LoginRequired { next: String },
}

impl AuthRejection {
    pub fn login_url(&self) -> String {
        match self {
            AuthRejection::LoginRequired { next } => format!("/login/?next={}", next),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        Redirect::to(&self.login_url()).into_response()
    }
}
