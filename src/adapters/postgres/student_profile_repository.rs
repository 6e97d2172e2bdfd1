//! PostgreSQL implementation of StudentProfileRepository.
//!
//! Duplicate detection is left entirely to the table's unique constraints.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, StudentProfileId, Timestamp, UserId};
use crate::domain::student::{Gpa, Major, StudentId, StudentProfile};
use crate::ports::StudentProfileRepository;

use super::{column_error, violated_constraint};

const USER_ID_KEY: &str = "student_profiles_user_id_key";
const STUDENT_ID_KEY: &str = "student_profiles_student_id_key";
const USER_ID_FKEY: &str = "student_profiles_user_id_fkey";

#[derive(Clone)]
pub struct PostgresStudentProfileRepository {
    pool: PgPool,
}

impl PostgresStudentProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentProfileRepository for PostgresStudentProfileRepository {
    async fn create(&self, profile: &StudentProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO student_profiles (
                id, user_id, student_id, major, gpa, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.id().as_uuid())
        .bind(profile.user_id().as_uuid())
        .bind(profile.student_id().as_str())
        .bind(profile.major().as_str())
        .bind(profile.gpa().map(|gpa| gpa.value()))
        .bind(profile.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some(USER_ID_KEY) => DomainError::new(
                ErrorCode::DuplicateProfile,
                format!("User already has a student profile: {}", profile.user_id()),
            )
            .with_detail("user_id", profile.user_id().to_string()),
            Some(STUDENT_ID_KEY) => DomainError::new(
                ErrorCode::DuplicateStudentId,
                format!("Student ID already in use: {}", profile.student_id()),
            )
            .with_detail("student_id", profile.student_id().as_str()),
            Some(USER_ID_FKEY) => DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", profile.user_id()),
            ),
            _ => DomainError::database("Failed to insert student profile", &e),
        })?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<StudentProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, student_id, major, gpa, created_at
            FROM student_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch student profile", e))?;

        row.map(row_to_profile).transpose()
    }
}

fn row_to_profile(row: sqlx::postgres::PgRow) -> Result<StudentProfile, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(column_error("id"))?;
    let user_id: uuid::Uuid = row.try_get("user_id").map_err(column_error("user_id"))?;
    let student_id: String = row.try_get("student_id").map_err(column_error("student_id"))?;
    let major: String = row.try_get("major").map_err(column_error("major"))?;
    let gpa: Option<f64> = row.try_get("gpa").map_err(column_error("gpa"))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(column_error("created_at"))?;

    let stored = |e: crate::domain::foundation::ValidationError| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored student profile is invalid: {}", e),
        )
    };

    Ok(StudentProfile::reconstitute(
        StudentProfileId::from_uuid(id),
        UserId::from_uuid(user_id),
        StudentId::new(student_id).map_err(stored)?,
        Major::new(major).map_err(stored)?,
        gpa.map(Gpa::new).transpose().map_err(stored)?,
        Timestamp::from_datetime(created_at),
    ))
}
