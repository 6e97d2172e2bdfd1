//! GetStudentProfile - Query handler for the logged-in user's profile page.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::RequestContext;
use crate::domain::student::{Gpa, ProfileError, StudentProfile};
use crate::ports::StudentProfileRepository;

/// Display-ready view of a student profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentProfileView {
    pub username: String,
    pub student_id: String,
    pub major: String,
    /// `None` when no GPA was recorded.
    pub gpa: Option<Gpa>,
}

impl StudentProfileView {
    fn from_profile(username: &str, profile: &StudentProfile) -> Self {
        Self {
            username: username.to_string(),
            student_id: profile.student_id().to_string(),
            major: profile.major().to_string(),
            gpa: profile.gpa(),
        }
    }
}

/// Text form: `"{username} - {student_id}"`.
impl fmt::Display for StudentProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.username, self.student_id)
    }
}

pub struct GetStudentProfileHandler {
    profiles: Arc<dyn StudentProfileRepository>,
}

impl GetStudentProfileHandler {
    pub fn new(profiles: Arc<dyn StudentProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Fails with `ProfileError::NotFound` when the user has no profile yet.
    pub async fn handle(&self, ctx: &RequestContext) -> Result<StudentProfileView, ProfileError> {
        let profile = self
            .profiles
            .find_by_user(ctx.user_id())
            .await?
            .ok_or(ProfileError::NotFound(*ctx.user_id()))?;

        Ok(StudentProfileView::from_profile(ctx.username(), &profile))
    }
}
