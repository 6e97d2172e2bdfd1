//! StudentProfile aggregate and its value objects.
//!
//! A profile is a one-to-one extension of a user holding academic fields.
//! Raw submitted values are only coerced into the shapes the store accepts;
//! there is no further business validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StudentProfileId, Timestamp, UserId, ValidationError};

/// Maximum length for a student ID, in characters.
pub const MAX_STUDENT_ID_LENGTH: usize = 10;

/// Maximum length for a major, in characters.
pub const MAX_MAJOR_LENGTH: usize = 100;

/// Externally assigned student identifier. Unique across profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("student_id"));
        }
        let length = value.chars().count();
        if length > MAX_STUDENT_ID_LENGTH {
            return Err(ValidationError::too_long(
                "student_id",
                MAX_STUDENT_ID_LENGTH,
                length,
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text field of study. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Major(String);

impl Major {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let length = value.chars().count();
        if length > MAX_MAJOR_LENGTH {
            return Err(ValidationError::too_long("major", MAX_MAJOR_LENGTH, length));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Grade point average as stored (double precision).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gpa(f64);

impl Gpa {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("gpa", "must be a finite number"));
        }
        Ok(Self(value))
    }

    /// Coerces a raw form value. Absent or blank input means "no GPA".
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };
        let value: f64 = raw
            .parse()
            .map_err(|_| ValidationError::invalid_format("gpa", format!("'{}' is not a number", raw)))?;
        Self::new(value).map(Some)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Gpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.1}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// StudentProfile aggregate.
///
/// # Invariants
///
/// - At most one profile per user (unique index on `user_id`)
/// - `student_id` unique across profiles (unique index)
/// - Never mutated after creation
/// - Removed only when the owning user is deleted (cascade)
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    id: StudentProfileId,
    user_id: UserId,
    student_id: StudentId,
    major: Major,
    gpa: Option<Gpa>,
    created_at: Timestamp,
}

impl StudentProfile {
    /// Create a new profile for a user from already-coerced values.
    pub fn new(user_id: UserId, student_id: StudentId, major: Major, gpa: Option<Gpa>) -> Self {
        Self {
            id: StudentProfileId::new(),
            user_id,
            student_id,
            major,
            gpa,
            created_at: Timestamp::now(),
        }
    }

    /// Create a profile from raw submitted values.
    ///
    /// Missing `student_id` or `major` are rejected the way a NOT NULL
    /// column would reject them.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if student_id or major is absent, or student_id is empty
    /// - `TooLong` if a value exceeds its column length
    /// - `InvalidFormat` if gpa is not a number
    pub fn from_submission(
        user_id: UserId,
        student_id: Option<&str>,
        major: Option<&str>,
        gpa: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let student_id = StudentId::new(
            student_id.ok_or_else(|| ValidationError::empty_field("student_id"))?,
        )?;
        let major = Major::new(major.ok_or_else(|| ValidationError::empty_field("major"))?)?;
        let gpa = Gpa::parse_optional(gpa)?;
        Ok(Self::new(user_id, student_id, major, gpa))
    }

    /// Reconstitute a profile from persistence (no validation).
    pub fn reconstitute(
        id: StudentProfileId,
        user_id: UserId,
        student_id: StudentId,
        major: Major,
        gpa: Option<Gpa>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            student_id,
            major,
            gpa,
            created_at,
        }
    }

    pub fn id(&self) -> &StudentProfileId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn major(&self) -> &Major {
        &self.major
    }

    pub fn gpa(&self) -> Option<Gpa> {
        self.gpa
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
