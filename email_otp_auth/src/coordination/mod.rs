mod auth;
mod errors;
mod principal;
mod types;

pub use auth::{complete_login, register, request_login_code, resend_code, verify_email};
pub use errors::AuthError;
pub use principal::authenticate;
pub use types::{AuthResponse, Principal};
