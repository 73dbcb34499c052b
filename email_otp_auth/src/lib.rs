//! email-otp-auth - Two-factor authentication core
//!
//! This crate provides the verification-code lifecycle, the two-factor login
//! state machine and access token issuance for a password + emailed one-time
//! code flow: a caller registers, proves control of their address by
//! consuming a mailed 6-digit code, and on login exchanges password plus a
//! second code for a signed, expiring bearer token.
//!
//! The HTTP layer, the concrete mail transport and session storage are out
//! of scope; routing frameworks call the coordination functions directly and
//! plug their transport in through [`Notifier`].

mod coordination;
mod notify;
mod password;
mod storage;
#[cfg(test)]
mod test_utils;
mod token;
mod userdb;
mod utils;
mod verification;

// Re-export the auth state machine
pub use coordination::{
    AuthError, AuthResponse, Principal, authenticate, complete_login, register,
    request_login_code, resend_code, verify_email,
};

// Re-export the notifier contract
pub use notify::{Notifier, NotifyError, TracingNotifier, set_notifier};

// Re-export token operations for caller-side validation and gating
pub use token::{
    Claims, TokenError, has_role, is_token_valid, mint_token, token_role, token_subject,
    verify_token,
};

pub use userdb::{User, UserError, UserRole, UserSearchField, UserStore};

pub use verification::{
    CodePurpose, VerificationCode, VerificationError, consume_code, issue_code, latest_code,
    purge_codes,
};

/// Initialize the authentication core
///
/// Connects the configured data store, creates and validates the tables, and
/// fails fast on bad process configuration (including a missing or too-short
/// signing secret).
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the underlying stores
    userdb::init().await?;
    verification::init().await?;
    token::init()?;
    Ok(())
}
