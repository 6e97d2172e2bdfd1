//! Portal HTTP adapter - server-rendered registration, login and student
//! profile pages.

mod dto;
mod handlers;
mod pages;
mod routes;

pub use dto::{safe_next, CreateProfileRequest, LoginQuery, LoginRequest, RegisterRequest};
pub(crate) use handlers::internal_error;
pub use handlers::PortalAppState;
pub use pages::{
    CreateProfilePage, ErrorPage, LoginPage, PageError, Pages, ProfilePage, RegisterPage,
    MISSING_GPA,
};
pub use routes::{portal_router, portal_routes};
