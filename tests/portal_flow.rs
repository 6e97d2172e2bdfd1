//! End-to-end tests for the portal pages.
//!
//! Drives the full axum router (session middleware included) against the
//! in-memory adapters:
//! 1. Registration creates a user and a session
//! 2. Profile creation honours the uniqueness constraints
//! 3. Profile display renders the stored values
//! 4. Login and logout manage the session cookie

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use student_portal::adapters::auth::Argon2PasswordHasher;
use student_portal::adapters::http::middleware::SessionCookie;
use student_portal::adapters::http::portal::{portal_router, Pages, PortalAppState};
use student_portal::adapters::memory::InMemoryPortalStore;
use student_portal::adapters::sessions::InMemorySessionStore;
use student_portal::domain::user::{Username, FIELD_REQUIRED, INVALID_LOGIN, USERNAME_TAKEN};
use student_portal::ports::UserRepository;

const COOKIE_NAME: &str = "portal_session";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Portal {
    store: InMemoryPortalStore,
    sessions: InMemorySessionStore,
    router: Router,
}

impl Portal {
    fn new() -> Self {
        let store = InMemoryPortalStore::new();
        let ttl = Duration::from_secs(3600);
        let sessions = InMemorySessionStore::new(ttl);
        let state = PortalAppState::new(
            Arc::new(store.users()),
            Arc::new(store.profiles()),
            Arc::new(sessions.clone()),
            Arc::new(Argon2PasswordHasher::with_cost(1024, 1).unwrap()),
            Arc::new(Pages::new().unwrap()),
            SessionCookie::new(COOKIE_NAME, ttl, false),
        );
        Self {
            store,
            sessions,
            router: portal_router(state, Duration::from_secs(30)),
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Registers `username` and returns the session cookie pair.
    async fn register(&self, username: &str) -> String {
        let response = self
            .post(
                "/register/",
                &format!("username={}&password=s3cret-pass&password_confirm=s3cret-pass", username),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("registration sets the session cookie")
    }
}

/// `name=value` of the session cookie set by a response, if non-empty.
fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| value.starts_with(&format!("{}=", COOKIE_NAME)))
        .filter_map(|value| value.split(';').next())
        .find(|pair| pair.len() > COOKIE_NAME.len() + 1)
        .map(str::to_string)
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn valid_registration_creates_user_and_session() {
    let portal = Portal::new();

    let response = portal
        .post(
            "/register/",
            "username=alice&password=s3cret-pass&password_confirm=s3cret-pass",
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/create_profile/");
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("portal_session=") && c.contains("HttpOnly")));
    assert_eq!(portal.store.user_count().await, 1);
    assert_eq!(portal.sessions.len().await, 1);
}

#[tokio::test]
async fn registration_with_blank_confirmation_succeeds() {
    let portal = Portal::new();

    let response = portal
        .post(
            "/register/",
            "username=alice&password=s3cret-pass&password_confirm=",
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/create_profile/");
    assert!(session_cookie(&response).is_some());
    assert_eq!(portal.store.user_count().await, 1);
}

#[tokio::test]
async fn registration_without_username_rerenders_form() {
    let portal = Portal::new();

    let response = portal
        .post("/register/", "username=&password=s3cret-pass", None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    let html = body_text(response).await;
    assert!(html.contains(FIELD_REQUIRED));
    assert_eq!(portal.store.user_count().await, 0);
}

#[tokio::test]
async fn registration_with_taken_username_rerenders_form() {
    let portal = Portal::new();
    portal.register("alice").await;

    let response = portal
        .post("/register/", "username=alice&password=another-pass", None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(USERNAME_TAKEN));
    assert!(html.contains("value=\"alice\""));
    assert_eq!(portal.store.user_count().await, 1);
}

#[tokio::test]
async fn registration_with_mismatched_confirmation_creates_nothing() {
    let portal = Portal::new();

    let response = portal
        .post(
            "/register/",
            "username=alice&password=one-pass&password_confirm=other-pass",
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(portal.store.user_count().await, 0);
}

// =============================================================================
// Profile creation and display
// =============================================================================

#[tokio::test]
async fn full_flow_register_create_display() {
    let portal = Portal::new();
    let cookie = portal.register("alice").await;

    let response = portal
        .post(
            "/create_profile/",
            "student_id=S12345&major=CS&gpa=3.5",
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile/");
    assert_eq!(portal.store.profile_count().await, 1);

    let response = portal.get("/profile/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<title>alice - S12345</title>"));
    assert!(html.contains("<dd class=\"student-id\">S12345</dd>"));
    assert!(html.contains("<dd class=\"major\">CS</dd>"));
    assert!(html.contains("<dd class=\"gpa\">3.5</dd>"));
}

#[tokio::test]
async fn blank_gpa_is_displayed_as_missing() {
    let portal = Portal::new();
    let cookie = portal.register("alice").await;

    portal
        .post("/create_profile/", "student_id=S1&major=History&gpa=", Some(&cookie))
        .await;

    let html = body_text(portal.get("/profile/", Some(&cookie)).await).await;
    assert!(html.contains("<dd class=\"gpa\">—</dd>"));
}

#[tokio::test]
async fn profile_without_profile_is_not_found() {
    let portal = Portal::new();
    let cookie = portal.register("alice").await;

    let response = portal.get("/profile/", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("href=\"/create_profile/\""));
}

#[tokio::test]
async fn second_profile_for_same_user_conflicts() {
    let portal = Portal::new();
    let cookie = portal.register("alice").await;
    portal
        .post("/create_profile/", "student_id=S1&major=CS&gpa=3.0", Some(&cookie))
        .await;

    let response = portal
        .post("/create_profile/", "student_id=S2&major=Math&gpa=3.9", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(portal.store.profile_count().await, 1);

    let html = body_text(portal.get("/profile/", Some(&cookie)).await).await;
    assert!(html.contains("<dd class=\"student-id\">S1</dd>"));
}

#[tokio::test]
async fn reused_student_id_conflicts_without_new_record() {
    let portal = Portal::new();
    let alice = portal.register("alice").await;
    let bob = portal.register("bob").await;
    portal
        .post("/create_profile/", "student_id=S12345&major=CS&gpa=3.5", Some(&alice))
        .await;

    let response = portal
        .post("/create_profile/", "student_id=S12345&major=Art&gpa=2.0", Some(&bob))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(portal.store.profile_count().await, 1);
    assert_eq!(
        portal.get("/profile/", Some(&bob)).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn unparsable_gpa_is_bad_request() {
    let portal = Portal::new();
    let cookie = portal.register("alice").await;

    let response = portal
        .post("/create_profile/", "student_id=S1&major=CS&gpa=excellent", Some(&cookie))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(portal.store.profile_count().await, 0);
}

#[tokio::test]
async fn deleting_user_removes_profile() {
    let portal = Portal::new();
    let cookie = portal.register("alice").await;
    portal
        .post("/create_profile/", "student_id=S1&major=CS&gpa=3.0", Some(&cookie))
        .await;
    assert_eq!(portal.store.profile_count().await, 1);

    let users = portal.store.users();
    let alice = users
        .find_by_username(&Username::parse("alice").unwrap())
        .await
        .unwrap()
        .unwrap();
    users.delete(alice.id()).await.unwrap();

    assert_eq!(portal.store.profile_count().await, 0);
    let response = portal.get("/profile/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login/?next=/profile/");
}

// =============================================================================
// Login / Logout
// =============================================================================

#[tokio::test]
async fn login_with_wrong_password_sets_no_session() {
    let portal = Portal::new();
    portal.register("alice").await;
    let sessions_before = portal.sessions.len().await;

    let response = portal
        .post("/login/", "username=alice&password=wrong-pass", None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    let html = body_text(response).await;
    assert!(html.contains(INVALID_LOGIN));
    assert_eq!(portal.sessions.len().await, sessions_before);
}

#[tokio::test]
async fn login_redirects_to_local_next_only() {
    let portal = Portal::new();
    portal.register("alice").await;

    let response = portal
        .post(
            "/login/",
            "username=alice&password=s3cret-pass&next=%2Fcreate_profile%2F",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/create_profile/");
    assert!(session_cookie(&response).is_some());

    let response = portal
        .post(
            "/login/",
            "username=alice&password=s3cret-pass&next=%2F%2Fevil.example.com",
            None,
        )
        .await;
    assert_eq!(location(&response), "/profile/");
}

#[tokio::test]
async fn logout_revokes_session() {
    let portal = Portal::new();
    let cookie = portal.register("alice").await;
    assert_eq!(
        portal.get("/create_profile/", Some(&cookie)).await.status(),
        StatusCode::OK
    );

    let response = portal.post("/logout/", "", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login/");
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("portal_session=;") && c.contains("Max-Age=0")));
    assert!(portal.sessions.is_empty().await);

    let response = portal.get("/create_profile/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login/?next=/create_profile/");
}
