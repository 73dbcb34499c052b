//! User-facing error taxonomy for the auth state machine

use thiserror::Error;

use crate::password::PasswordError;
use crate::token::TokenError;
use crate::userdb::UserError;
use crate::utils::UtilError;
use crate::verification::VerificationError;

/// Errors surfaced by the auth operations.
///
/// Every variant except `Storage` is recoverable by the caller. Message text
/// never reveals which sub-condition failed where that would aid account or
/// code enumeration.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Username is already taken")]
    DuplicateUsername,

    /// Covers both "no such account" and "wrong password"
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("E-mail address is not verified")]
    AccountNotEnabled,

    /// Covers never-issued, wrong digits and already-consumed alike
    #[error("Verification code not found or already used")]
    CodeNotFound,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Account not found")]
    AccountNotFound,

    /// Infrastructure failure (store unavailable); the only fatal class
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Log the error and return self
    ///
    /// Recoverable variants are ordinary traffic and log at debug;
    /// infrastructure failures log at error.
    pub fn log(self) -> Self {
        match &self {
            Self::Storage(msg) => tracing::error!("Storage error: {msg}"),
            other => tracing::debug!("Auth error: {other}"),
        }
        self
    }
}

// Module errors map onto the taxonomy and log on conversion

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        let error = match err {
            UserError::DuplicateEmail => Self::DuplicateEmail,
            UserError::DuplicateUsername => Self::DuplicateUsername,
            UserError::NotFound => Self::AccountNotFound,
            UserError::Storage(msg) => Self::Storage(msg),
        };
        error.log()
    }
}

impl From<VerificationError> for AuthError {
    fn from(err: VerificationError) -> Self {
        let error = match err {
            VerificationError::CodeNotFound => Self::CodeNotFound,
            VerificationError::CodeExpired => Self::CodeExpired,
            VerificationError::Crypto(msg) | VerificationError::Storage(msg) => Self::Storage(msg),
        };
        error.log()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        let error = match err {
            TokenError::InvalidToken => Self::InvalidToken,
            TokenError::Signing(msg) => Self::Storage(msg),
        };
        error.log()
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        Self::Storage(err.to_string()).log()
    }
}

impl From<UtilError> for AuthError {
    fn from(err: UtilError) -> Self {
        Self::Storage(err.to_string()).log()
    }
}
