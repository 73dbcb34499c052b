use std::str::FromStr;

use crate::token::verify_token;
use crate::userdb::UserRole;

use super::errors::AuthError;
use super::types::Principal;

/// Derive the calling principal from a bearer token.
///
/// Verification is strict: signature and expiry must both hold, and the role
/// claim must be one the crate knows. There is no other path to a
/// [`Principal`].
pub fn authenticate(token: &str) -> Result<Principal, AuthError> {
    let claims = verify_token(token)?;
    let role = UserRole::from_str(&claims.role).map_err(|_| AuthError::InvalidToken.log())?;

    Ok(Principal {
        subject: claims.sub,
        role,
    })
}
