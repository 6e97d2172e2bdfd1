//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod student;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use student::{
    CreateStudentProfileCommand, CreateStudentProfileHandler, CreateStudentProfileResult,
    GetStudentProfileHandler, StudentProfileView,
};
pub use user::{
    AuthenticateSessionHandler, LoginUserHandler, LoginUserResult, LogoutUserHandler,
    RegisterUserHandler, RegisterUserResult,
};
