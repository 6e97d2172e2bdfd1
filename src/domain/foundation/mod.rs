//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, authentication types and error types
//! that form the vocabulary of the student portal domain.

mod auth;
mod context;
mod errors;
mod form_errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use context::RequestContext;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use form_errors::{FormErrors, NON_FIELD_ERRORS};
pub use ids::{StudentProfileId, UserId};
pub use timestamp::Timestamp;
