//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers that act for a logged-in user take an explicit `RequestContext`.

pub mod handlers;

pub use handlers::{
    // User handlers
    AuthenticateSessionHandler, LoginUserHandler, LoginUserResult, LogoutUserHandler,
    RegisterUserHandler, RegisterUserResult,
    // Student handlers
    CreateStudentProfileCommand, CreateStudentProfileHandler, CreateStudentProfileResult,
    GetStudentProfileHandler, StudentProfileView,
};
