//! Server-rendered HTML pages.
//!
//! Templates are compiled into the binary and parsed once at startup. The
//! resulting [`Pages`] is immutable and shared by `Arc`.

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::application::handlers::StudentProfileView;
use crate::domain::foundation::{FormErrors, NON_FIELD_ERRORS};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../../../templates/base.html")),
    ("register.html", include_str!("../../../../templates/register.html")),
    ("login.html", include_str!("../../../../templates/login.html")),
    (
        "create_profile.html",
        include_str!("../../../../templates/create_profile.html"),
    ),
    ("profile.html", include_str!("../../../../templates/profile.html")),
    ("error.html", include_str!("../../../../templates/error.html")),
];

/// Shown in place of a NULL GPA.
pub const MISSING_GPA: &str = "—";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to load templates: {0}")]
    Load(#[source] tera::Error),

    #[error("failed to render {template}: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: tera::Error,
    },
}

// ════════════════════════════════════════════════════════════════════════════════
// Page views
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterPage {
    pub current_user: Option<String>,
    pub username: String,
    pub username_errors: Vec<String>,
    pub password_errors: Vec<String>,
    pub password_confirm_errors: Vec<String>,
    pub non_field_errors: Vec<String>,
}

impl RegisterPage {
    /// Re-render after failed validation, keeping the submitted username.
    pub fn with_errors(username: impl Into<String>, errors: &FormErrors) -> Self {
        Self {
            current_user: None,
            username: username.into(),
            username_errors: errors.for_field("username"),
            password_errors: errors.for_field("password"),
            password_confirm_errors: errors.for_field("password_confirm"),
            non_field_errors: errors.for_field(NON_FIELD_ERRORS),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginPage {
    pub current_user: Option<String>,
    pub username: String,
    pub next: String,
    pub username_errors: Vec<String>,
    pub password_errors: Vec<String>,
    pub non_field_errors: Vec<String>,
}

impl LoginPage {
    pub fn with_errors(
        username: impl Into<String>,
        next: impl Into<String>,
        errors: &FormErrors,
    ) -> Self {
        Self {
            current_user: None,
            username: username.into(),
            next: next.into(),
            username_errors: errors.for_field("username"),
            password_errors: errors.for_field("password"),
            non_field_errors: errors.non_field(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProfilePage {
    pub current_user: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfilePage {
    pub current_user: Option<String>,
    pub username: String,
    pub student_id: String,
    pub major: String,
    pub gpa: String,
}

impl From<StudentProfileView> for ProfilePage {
    fn from(view: StudentProfileView) -> Self {
        let gpa = view
            .gpa
            .map_or_else(|| MISSING_GPA.to_string(), |gpa| gpa.to_string());
        Self {
            current_user: Some(view.username.clone()),
            username: view.username,
            student_id: view.student_id,
            major: view.major,
            gpa,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPage {
    pub current_user: Option<String>,
    pub status: u16,
    pub title: String,
    pub message: String,
    pub link_href: Option<String>,
    pub link_text: Option<String>,
}

impl ErrorPage {
    pub fn new(status: u16, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            current_user: None,
            status,
            title: title.into(),
            message: message.into(),
            link_href: None,
            link_text: None,
        }
    }

    pub fn with_link(mut self, href: impl Into<String>, text: impl Into<String>) -> Self {
        self.link_href = Some(href.into());
        self.link_text = Some(text.into());
        self
    }

    pub fn for_user(mut self, username: Option<&str>) -> Self {
        self.current_user = username.map(str::to_string);
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Renderer
// ════════════════════════════════════════════════════════════════════════════════

pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, PageError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .map_err(PageError::Load)?;
        Ok(Self { tera })
    }

    pub fn register(&self, page: &RegisterPage) -> Result<String, PageError> {
        self.render("register.html", page)
    }

    pub fn login(&self, page: &LoginPage) -> Result<String, PageError> {
        self.render("login.html", page)
    }

    pub fn create_profile(&self, page: &CreateProfilePage) -> Result<String, PageError> {
        self.render("create_profile.html", page)
    }

    pub fn profile(&self, page: &ProfilePage) -> Result<String, PageError> {
        self.render("profile.html", page)
    }

    pub fn error(&self, page: &ErrorPage) -> Result<String, PageError> {
        self.render("error.html", page)
    }

    fn render<T: Serialize>(&self, template: &'static str, page: &T) -> Result<String, PageError> {
        let context = Context::from_serialize(page)
            .map_err(|source| PageError::Render { template, source })?;
        self.tera
            .render(template, &context)
            .map_err(|source| PageError::Render { template, source })
    }
}

impl std::fmt::Debug for Pages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pages").finish_non_exhaustive()
    }
}
