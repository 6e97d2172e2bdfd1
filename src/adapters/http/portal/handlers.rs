//! HTTP handlers for the portal pages.
//!
//! These handlers connect axum routes to the application handlers and turn
//! their results into rendered pages, redirects and cookies.

use std::sync::Arc;

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::adapters::http::middleware::{OptionalAuth, RequireAuth, SessionCookie};
use crate::application::handlers::{
    AuthenticateSessionHandler, CreateStudentProfileHandler, GetStudentProfileHandler,
    LoginUserHandler, LogoutUserHandler, RegisterUserHandler,
};
use crate::domain::student::ProfileError;
use crate::domain::user::UserError;
use crate::ports::{PasswordHasher, SessionStore, StudentProfileRepository, UserRepository};

use super::dto::{safe_next, CreateProfileRequest, LoginQuery, LoginRequest, RegisterRequest};
use super::pages::{
    CreateProfilePage, ErrorPage, LoginPage, PageError, Pages, ProfilePage, RegisterPage,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the portal routes.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct PortalAppState {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn StudentProfileRepository>,
    pub sessions: Arc<dyn SessionStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub pages: Arc<Pages>,
    pub cookie: SessionCookie,
}

impl PortalAppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        profiles: Arc<dyn StudentProfileRepository>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        pages: Arc<Pages>,
        cookie: SessionCookie,
    ) -> Self {
        Self {
            users,
            profiles,
            sessions,
            hasher,
            pages,
            cookie,
        }
    }

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.sessions.clone(),
        )
    }

    pub fn login_user_handler(&self) -> LoginUserHandler {
        LoginUserHandler::new(
            self.users.clone(),
            self.hasher.clone(),
            self.sessions.clone(),
        )
    }

    pub fn logout_user_handler(&self) -> LogoutUserHandler {
        LogoutUserHandler::new(self.sessions.clone())
    }

    pub fn authenticate_session_handler(&self) -> AuthenticateSessionHandler {
        AuthenticateSessionHandler::new(self.sessions.clone(), self.users.clone())
    }

    pub fn create_student_profile_handler(&self) -> CreateStudentProfileHandler {
        CreateStudentProfileHandler::new(self.profiles.clone())
    }

    pub fn get_student_profile_handler(&self) -> GetStudentProfileHandler {
        GetStudentProfileHandler::new(self.profiles.clone())
    }
}

impl std::fmt::Debug for PortalAppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalAppState")
            .field("cookie", &self.cookie)
            .finish_non_exhaustive()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Registration
// ════════════════════════════════════════════════════════════════════════════════

/// GET /register/
pub async fn register_form(State(state): State<PortalAppState>, auth: OptionalAuth) -> Response {
    let page = RegisterPage {
        current_user: auth.username().map(str::to_string),
        ..RegisterPage::default()
    };
    render(&state.pages, StatusCode::OK, state.pages.register(&page), auth.username())
}

/// POST /register/
///
/// Validation failures re-render the form with 200; success opens a session
/// and continues to profile creation.
pub async fn register(
    State(state): State<PortalAppState>,
    jar: CookieJar,
    Form(request): Form<RegisterRequest>,
) -> Response {
    let username = request.username.clone();

    match state.register_user_handler().handle(request.into_form()).await {
        Ok(result) => match state.cookie.issue(&result.session) {
            Ok(cookie) => (jar.add(cookie), Redirect::to("/create_profile/")).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "failed to build session cookie");
                internal_error(&state.pages, Some(result.user.username.as_str()))
            }
        },
        Err(UserError::InvalidForm(errors)) => {
            let page = RegisterPage::with_errors(username, &errors);
            render(&state.pages, StatusCode::OK, state.pages.register(&page), None)
        }
        Err(err) => user_error_response(&state.pages, &err),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Login / Logout
// ════════════════════════════════════════════════════════════════════════════════

/// GET /login/
pub async fn login_form(
    State(state): State<PortalAppState>,
    auth: OptionalAuth,
    Query(query): Query<LoginQuery>,
) -> Response {
    let page = LoginPage {
        current_user: auth.username().map(str::to_string),
        next: query.next.unwrap_or_default(),
        ..LoginPage::default()
    };
    render(&state.pages, StatusCode::OK, state.pages.login(&page), auth.username())
}

/// POST /login/
pub async fn login(
    State(state): State<PortalAppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> Response {
    let username = request.username.clone();
    let next = request.next.clone().unwrap_or_default();

    match state.login_user_handler().handle(request.into_form()).await {
        Ok(result) => match state.cookie.issue(&result.session) {
            Ok(cookie) => {
                let target = safe_next(Some(next.as_str()));
                (jar.add(cookie), Redirect::to(target)).into_response()
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to build session cookie");
                internal_error(&state.pages, Some(result.user.username.as_str()))
            }
        },
        Err(UserError::InvalidForm(errors)) => {
            let page = LoginPage::with_errors(username, next, &errors);
            render(&state.pages, StatusCode::OK, state.pages.login(&page), None)
        }
        Err(err) => user_error_response(&state.pages, &err),
    }
}

/// POST /logout/
///
/// Idempotent: without a session it only clears the cookie.
pub async fn logout(State(state): State<PortalAppState>, jar: CookieJar) -> Response {
    if let Some(token) = state.cookie.token_from(&jar) {
        if let Err(err) = state.logout_user_handler().handle(&token).await {
            return user_error_response(&state.pages, &err);
        }
    }

    match state.cookie.clear() {
        Ok(cookie) => (jar.add(cookie), Redirect::to("/login/")).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to build clearing cookie");
            internal_error(&state.pages, None)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Student Profile
// ════════════════════════════════════════════════════════════════════════════════

/// GET /create_profile/
pub async fn create_profile_form(
    State(state): State<PortalAppState>,
    RequireAuth(ctx): RequireAuth,
) -> Response {
    let page = CreateProfilePage {
        current_user: Some(ctx.username().to_string()),
    };
    render(
        &state.pages,
        StatusCode::OK,
        state.pages.create_profile(&page),
        Some(ctx.username()),
    )
}

/// POST /create_profile/
pub async fn create_profile(
    State(state): State<PortalAppState>,
    RequireAuth(ctx): RequireAuth,
    Form(request): Form<CreateProfileRequest>,
) -> Response {
    match state
        .create_student_profile_handler()
        .handle(request.into(), &ctx)
        .await
    {
        Ok(_) => Redirect::to("/profile/").into_response(),
        Err(err) => profile_error_response(&state.pages, &err, Some(ctx.username())),
    }
}

/// GET /profile/
pub async fn profile(State(state): State<PortalAppState>, RequireAuth(ctx): RequireAuth) -> Response {
    match state.get_student_profile_handler().handle(&ctx).await {
        Ok(view) => {
            let page = ProfilePage::from(view);
            render(
                &state.pages,
                StatusCode::OK,
                state.pages.profile(&page),
                Some(ctx.username()),
            )
        }
        Err(err) => profile_error_response(&state.pages, &err, Some(ctx.username())),
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

fn render(
    pages: &Pages,
    status: StatusCode,
    rendered: Result<String, PageError>,
    current_user: Option<&str>,
) -> Response {
    match rendered {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "page rendering failed");
            internal_error(pages, current_user)
        }
    }
}

fn error_page(pages: &Pages, page: ErrorPage) -> Response {
    let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match pages.error(&page) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "error page rendering failed");
            (status, page.message).into_response()
        }
    }
}

/// 500 page for infrastructure failures. Falls back to plain text when the
/// error template itself cannot be rendered.
pub(crate) fn internal_error(pages: &Pages, current_user: Option<&str>) -> Response {
    let page = ErrorPage::new(
        StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        "Server error",
        "Something went wrong on our side. Please try again later.",
    )
    .for_user(current_user);
    error_page(pages, page)
}

fn user_error_response(pages: &Pages, err: &UserError) -> Response {
    tracing::error!(error = %err, code = %err.code(), "account request failed");
    internal_error(pages, None)
}

fn profile_error_response(pages: &Pages, err: &ProfileError, current_user: Option<&str>) -> Response {
    let page = match err {
        ProfileError::NotFound(_) => ErrorPage::new(
            StatusCode::NOT_FOUND.as_u16(),
            "Profile not found",
            "You have not created a student profile yet.",
        )
        .with_link("/create_profile/", "Create your profile"),
        ProfileError::DuplicateProfile(_) => ErrorPage::new(
            StatusCode::CONFLICT.as_u16(),
            "Profile already exists",
            "You already have a student profile.",
        )
        .with_link("/profile/", "View your profile"),
        ProfileError::DuplicateStudentId(_) => ErrorPage::new(
            StatusCode::CONFLICT.as_u16(),
            "Student ID already in use",
            err.to_string(),
        )
        .with_link("/create_profile/", "Back to the form"),
        ProfileError::InvalidField { .. } => ErrorPage::new(
            StatusCode::BAD_REQUEST.as_u16(),
            "Invalid submission",
            err.to_string(),
        )
        .with_link("/create_profile/", "Back to the form"),
        ProfileError::Infrastructure(_) => {
            tracing::error!(error = %err, code = %err.code(), "profile request failed");
            return internal_error(pages, current_user);
        }
    };

    tracing::info!(code = %err.code(), status = page.status, "profile request rejected");
    error_page(pages, page.for_user(current_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn pages() -> Pages {
        Pages::new().unwrap()
    }

    #[test]
    fn profile_errors_map_to_dedicated_statuses() {
        let pages = pages();
        let user_id = UserId::new();

        let cases = [
            (ProfileError::NotFound(user_id), StatusCode::NOT_FOUND),
            (ProfileError::DuplicateProfile(user_id), StatusCode::CONFLICT),
            (
                ProfileError::DuplicateStudentId("S12345".into()),
                StatusCode::CONFLICT,
            ),
            (
                ProfileError::InvalidField {
                    field: "gpa".into(),
                    reason: "not a number".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ProfileError::Infrastructure("connection reset".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = profile_error_response(&pages, &err, Some("alice"));
            assert_eq!(response.status(), expected, "for {:?}", err);
        }
    }

    #[test]
    fn internal_error_is_500() {
        let response = internal_error(&pages(), None);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn user_errors_are_500() {
        let response = user_error_response(&pages(), &UserError::infrastructure("db down"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn health_says_ok() {
        assert_eq!(health().await, "ok");
    }
}
