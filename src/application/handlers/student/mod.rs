//! Student profile handlers.

mod create_student_profile;
mod get_student_profile;

pub use create_student_profile::{
    CreateStudentProfileCommand, CreateStudentProfileHandler, CreateStudentProfileResult,
};
pub use get_student_profile::{GetStudentProfileHandler, StudentProfileView};
