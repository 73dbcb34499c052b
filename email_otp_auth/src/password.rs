//! Opaque one-way password primitive over bcrypt.

use std::{env, sync::LazyLock};
use thiserror::Error;

/// bcrypt work factor; tests lower it via PASSWORD_HASH_COST
static PASSWORD_HASH_COST: LazyLock<u32> = LazyLock::new(|| {
    env::var("PASSWORD_HASH_COST")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(bcrypt::DEFAULT_COST)
});

#[derive(Clone, Error, Debug)]
pub enum PasswordError {
    #[error("Hashing error: {0}")]
    Hash(String),
}

/// One-way hash of a plaintext password
pub(crate) fn hash_password(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, *PASSWORD_HASH_COST).map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check a plaintext password against a stored hash
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::Hash(e.to_string()))
}
