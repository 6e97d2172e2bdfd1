//! CreateStudentProfile - Command handler for attaching a profile to the
//! logged-in user.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, RequestContext, StudentProfileId};
use crate::domain::student::{ProfileError, StudentProfile};
use crate::ports::StudentProfileRepository;

/// Raw submitted profile fields.
#[derive(Debug, Clone, Default)]
pub struct CreateStudentProfileCommand {
    pub student_id: Option<String>,
    pub major: Option<String>,
    pub gpa: Option<String>,
}

/// Result of successful profile creation.
#[derive(Debug, Clone)]
pub struct CreateStudentProfileResult {
    pub profile_id: StudentProfileId,
}

/// Handler for creating a student profile.
///
/// The owner comes from the request context, never from the submission.
/// No duplicate pre-check is made; the repository's unique constraints
/// decide, and a failed insert leaves nothing behind.
pub struct CreateStudentProfileHandler {
    profiles: Arc<dyn StudentProfileRepository>,
}

impl CreateStudentProfileHandler {
    pub fn new(profiles: Arc<dyn StudentProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(
        &self,
        cmd: CreateStudentProfileCommand,
        ctx: &RequestContext,
    ) -> Result<CreateStudentProfileResult, ProfileError> {
        let profile = StudentProfile::from_submission(
            *ctx.user_id(),
            cmd.student_id.as_deref(),
            cmd.major.as_deref(),
            cmd.gpa.as_deref(),
        )?;

        if let Err(err) = self.profiles.create(&profile).await {
            return Err(match err.code() {
                ErrorCode::DuplicateProfile => ProfileError::DuplicateProfile(*ctx.user_id()),
                ErrorCode::DuplicateStudentId => {
                    ProfileError::DuplicateStudentId(profile.student_id().to_string())
                }
                _ => err.into(),
            });
        }

        tracing::info!(
            user_id = %ctx.user_id(),
            profile_id = %profile.id(),
            correlation_id = ctx.correlation_id(),
            "student profile created"
        );

        Ok(CreateStudentProfileResult {
            profile_id: *profile.id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::AuthenticatedUser;
    use crate::domain::user::{User, Username};

    async fn logged_in(f: &Fixture, username: &str) -> RequestContext {
        let user = User::new(Username::parse(username).unwrap(), "hash".into());
        f.users.create(&user).await.unwrap();
        RequestContext::new(AuthenticatedUser::new(*user.id(), username))
    }

    fn cmd(student_id: &str, major: &str, gpa: Option<&str>) -> CreateStudentProfileCommand {
        CreateStudentProfileCommand {
            student_id: Some(student_id.to_string()),
            major: Some(major.to_string()),
            gpa: gpa.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn creates_profile_owned_by_context_user() {
        let f = Fixture::new();
        let ctx = logged_in(&f, "alice").await;
        let handler = CreateStudentProfileHandler::new(f.profiles.clone());

        let result = handler
            .handle(cmd("S12345", "CS", Some("3.5")), &ctx)
            .await
            .unwrap();

        let stored = f.profiles.find_by_user(ctx.user_id()).await.unwrap().unwrap();
        assert_eq!(stored.id(), &result.profile_id);
        assert_eq!(stored.student_id().as_str(), "S12345");
        assert_eq!(stored.major().as_str(), "CS");
        assert_eq!(stored.gpa().map(|g| g.value()), Some(3.5));
    }

    #[tokio::test]
    async fn blank_gpa_is_stored_as_null() {
        let f = Fixture::new();
        let ctx = logged_in(&f, "alice").await;

        CreateStudentProfileHandler::new(f.profiles.clone())
            .handle(cmd("S1", "CS", Some("")), &ctx)
            .await
            .unwrap();

        let stored = f.profiles.find_by_user(ctx.user_id()).await.unwrap().unwrap();
        assert!(stored.gpa().is_none());
    }

    #[tokio::test]
    async fn second_profile_for_same_user_is_rejected() {
        let f = Fixture::new();
        let ctx = logged_in(&f, "alice").await;
        let handler = CreateStudentProfileHandler::new(f.profiles.clone());
        handler.handle(cmd("S1", "CS", None), &ctx).await.unwrap();

        let err = handler
            .handle(cmd("S2", "Math", None), &ctx)
            .await
            .unwrap_err();

        assert_eq!(err, ProfileError::DuplicateProfile(*ctx.user_id()));
        let stored = f.profiles.find_by_user(ctx.user_id()).await.unwrap().unwrap();
        assert_eq!(stored.student_id().as_str(), "S1");
    }

    #[tokio::test]
    async fn reused_student_id_is_rejected_and_nothing_saved() {
        let f = Fixture::new();
        let alice = logged_in(&f, "alice").await;
        let bob = logged_in(&f, "bob").await;
        let handler = CreateStudentProfileHandler::new(f.profiles.clone());
        handler.handle(cmd("S12345", "CS", None), &alice).await.unwrap();

        let err = handler
            .handle(cmd("S12345", "Math", None), &bob)
            .await
            .unwrap_err();

        assert_eq!(err, ProfileError::DuplicateStudentId("S12345".into()));
        assert!(f.profiles.find_by_user(bob.user_id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn uncoercible_gpa_is_invalid_field() {
        let f = Fixture::new();
        let ctx = logged_in(&f, "alice").await;

        let err = CreateStudentProfileHandler::new(f.profiles.clone())
            .handle(cmd("S1", "CS", Some("abc")), &ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::InvalidField { ref field, .. } if field == "gpa"));
        assert_eq!(f.store.profile_count().await, 0);
    }

    #[tokio::test]
    async fn over_long_student_id_is_invalid_field() {
        let f = Fixture::new();
        let ctx = logged_in(&f, "alice").await;

        let err = CreateStudentProfileHandler::new(f.profiles.clone())
            .handle(cmd("S1234567890", "CS", None), &ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::InvalidField { ref field, .. } if field == "student_id"));
    }

    #[tokio::test]
    async fn unknown_owner_is_infrastructure_error() {
        let f = Fixture::new();
        let ctx = RequestContext::test_fixture("ghost");

        let err = CreateStudentProfileHandler::new(f.profiles.clone())
            .handle(cmd("S1", "CS", None), &ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileError::Infrastructure(_)));
    }
}
