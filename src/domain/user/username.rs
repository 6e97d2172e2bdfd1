//! Username value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum length for a username, in characters.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Login name for a user account.
///
/// # Invariants
///
/// - 1-150 characters after trimming surrounding whitespace
/// - Only letters, digits and `@ . + - _`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parses raw form input into a username.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }

        let length = value.chars().count();
        if length > MAX_USERNAME_LENGTH {
            return Err(ValidationError::too_long(
                "username",
                MAX_USERNAME_LENGTH,
                length,
            ));
        }

        if !value.chars().all(is_username_char) {
            return Err(ValidationError::invalid_format(
                "username",
                "may contain only letters, numbers, and @/./+/-/_ characters",
            ));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}
