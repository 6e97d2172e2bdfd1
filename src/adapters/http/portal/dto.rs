//! Form bodies and query strings for the portal pages.
//!
//! Every field is defaulted so a missing field reaches validation as an
//! empty value instead of failing extraction.

use serde::Deserialize;

use crate::application::handlers::CreateStudentProfileCommand;
use crate::domain::user::{LoginForm, RegistrationForm};

/// POST /register/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: Option<String>,
}

impl RegisterRequest {
    pub fn into_form(self) -> RegistrationForm {
        RegistrationForm::new(self.username, self.password, self.password_confirm)
    }
}

/// POST /login/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginRequest {
    pub fn into_form(self) -> LoginForm {
        LoginForm::new(self.username, self.password)
    }
}

/// GET /login/?next=...
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub next: Option<String>,
}

/// POST /create_profile/ - raw values, coerced by the domain
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProfileRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
}

impl From<CreateProfileRequest> for CreateStudentProfileCommand {
    fn from(request: CreateProfileRequest) -> Self {
        Self {
            student_id: request.student_id,
            major: request.major,
            gpa: request.gpa,
        }
    }
}

/// Post-login destination. Only local paths are honoured.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/profile/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{Form, FromRequest};
    use axum::http::{header, Request};

    async fn extract_form<T>(body: &'static str) -> T
    where
        T: serde::de::DeserializeOwned + Send,
    {
        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let Form(value) = Form::<T>::from_request(request, &()).await.unwrap();
        value
    }

    #[tokio::test]
    async fn register_request_deserializes_with_missing_fields() {
        let request: RegisterRequest = extract_form("username=alice").await;
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "");
        assert!(request.password_confirm.is_none());
    }

    #[tokio::test]
    async fn blank_confirmation_arrives_as_empty_value() {
        let request: RegisterRequest =
            extract_form("username=alice&password=pw&password_confirm=").await;
        assert_eq!(request.password_confirm.as_deref(), Some(""));
        assert!(request.into_form().validate().is_ok());
    }

    #[tokio::test]
    async fn create_profile_request_keeps_blank_values() {
        let request: CreateProfileRequest =
            extract_form("student_id=S12345&major=CS&gpa=").await;
        let cmd = CreateStudentProfileCommand::from(request);
        assert_eq!(cmd.student_id.as_deref(), Some("S12345"));
        assert_eq!(cmd.major.as_deref(), Some("CS"));
        assert_eq!(cmd.gpa.as_deref(), Some(""));
    }

    #[test]
    fn safe_next_accepts_local_paths_only() {
        assert_eq!(safe_next(Some("/create_profile/")), "/create_profile/");
        assert_eq!(safe_next(Some("//evil.example.com")), "/profile/");
        assert_eq!(safe_next(Some("https://evil.example.com")), "/profile/");
        assert_eq!(safe_next(Some("/\\evil.example.com")), "/profile/");
        assert_eq!(safe_next(None), "/profile/");
    }
}
