//! The two-factor auth state machine: registration, email verification and
//! the two-step login.

use chrono::Utc;

use crate::password::{hash_password, verify_password};
use crate::token::{AUTH_TOKEN_VALIDITY, mint_token};
use crate::userdb::{User, UserSearchField, UserStore};
use crate::utils::gen_random_string;
use crate::verification::{self, CodePurpose};

use super::errors::AuthError;
use super::types::AuthResponse;

async fn get_user_by_email(email: &str) -> Result<Option<User>, AuthError> {
    Ok(UserStore::get_user_by(UserSearchField::Email(email.to_string())).await?)
}

/// Create a disabled account and issue a registration code to its address.
///
/// Duplicate email/username detection rides on the store's UNIQUE
/// constraints, so two racing registrations cannot both succeed. If the code
/// issue fails after the account was created, the disabled account remains
/// and the caller recovers through [`resend_code`].
#[tracing::instrument(skip(password))]
pub async fn register(email: &str, username: &str, password: &str) -> Result<(), AuthError> {
    let password_hash = hash_password(password)?;
    let user = User::new(email.to_string(), username.to_string(), password_hash);
    let user = UserStore::create_user(user).await?;

    verification::issue_code(&user.email, CodePurpose::Registration).await?;

    tracing::info!(email = %user.email, "Account registered, awaiting email verification");
    Ok(())
}

/// Consume a registration code and enable the account
#[tracing::instrument(skip(code))]
pub async fn verify_email(email: &str, code: &str) -> Result<(), AuthError> {
    verification::consume_code(email, code).await?;

    // The account vanishing between issuance and verification should not
    // happen under correct usage
    let user = get_user_by_email(email)
        .await?
        .ok_or_else(|| AuthError::AccountNotFound.log())?;

    let user = User {
        enabled: true,
        ..user
    };
    UserStore::update_user(user).await?;

    tracing::info!(email = %email, "Email verified, account enabled");
    Ok(())
}

/// Issue a fresh registration code to a known account's address
#[tracing::instrument]
pub async fn resend_code(email: &str) -> Result<(), AuthError> {
    let user = get_user_by_email(email)
        .await?
        .ok_or_else(|| AuthError::AccountNotFound.log())?;

    verification::issue_code(&user.email, CodePurpose::Registration).await?;
    Ok(())
}

/// First login step: check the password and issue a login code.
///
/// An absent account and a wrong password collapse into the same
/// `InvalidCredentials` so callers cannot probe which addresses are
/// registered.
#[tracing::instrument(skip(password))]
pub async fn request_login_code(email: &str, password: &str) -> Result<(), AuthError> {
    let user = match get_user_by_email(email).await? {
        Some(user) => user,
        None => return Err(AuthError::InvalidCredentials.log()),
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials.log());
    }

    if !user.enabled {
        return Err(AuthError::AccountNotEnabled.log());
    }

    verification::issue_code(&user.email, CodePurpose::Login).await?;
    Ok(())
}

/// Second login step: consume the login code, stamp the login time and mint
/// the tokens.
#[tracing::instrument(skip(code))]
pub async fn complete_login(email: &str, code: &str) -> Result<AuthResponse, AuthError> {
    verification::consume_code(email, code).await?;

    let user = get_user_by_email(email)
        .await?
        .ok_or_else(|| AuthError::AccountNotFound.log())?;

    let user = User {
        last_login: Some(Utc::now()),
        ..user
    };
    let user = UserStore::update_user(user).await?;

    let validity = *AUTH_TOKEN_VALIDITY;
    let access_token = mint_token(&user.email, user.role.as_str(), validity)?;
    let refresh_token = gen_random_string(32)?;

    tracing::info!(email = %user.email, "Two-factor login completed");
    Ok(AuthResponse {
        access_token,
        refresh_token,
        expires_in: validity,
        role: user.role.as_str().to_string(),
        username: user.username,
        email: user.email,
    })
}
