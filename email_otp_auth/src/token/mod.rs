mod config;
mod errors;
mod issuer;
mod types;

pub use errors::TokenError;
pub use issuer::{
    has_role, is_token_valid, mint_token, token_role, token_subject, verify_token,
};
pub use types::Claims;

pub(crate) use config::AUTH_TOKEN_VALIDITY;

pub(crate) fn init() -> Result<(), TokenError> {
    // Force secret validation at startup instead of on the first mint
    let _ = *config::AUTH_TOKEN_SECRET;
    let _ = *config::AUTH_TOKEN_VALIDITY;

    Ok(())
}
