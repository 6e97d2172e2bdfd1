//! User account handlers: registration, login, logout and session lookup.

mod authenticate_session;
mod login_user;
mod logout_user;
mod password;
mod register_user;

pub use authenticate_session::AuthenticateSessionHandler;
pub use login_user::{LoginUserHandler, LoginUserResult};
pub use logout_user::LogoutUserHandler;
pub use register_user::{RegisterUserHandler, RegisterUserResult};
