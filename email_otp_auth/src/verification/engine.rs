use chrono::Duration;
use ring::rand::SecureRandom;

use crate::notify::dispatch_code;

use super::config::{CODE_LENGTH, CODE_VALIDITY_MINUTES};
use super::errors::VerificationError;
use super::storage::CodeStore;
use super::types::{CodePurpose, VerificationCode};

/// Largest multiple of 1_000_000 that fits in a u32; draws at or above it are
/// rejected so every code in [0, 999999] is equally likely.
const REJECTION_BOUND: u32 = 4_294_000_000;

fn generate_code() -> Result<String, VerificationError> {
    let rng = ring::rand::SystemRandom::new();
    loop {
        let mut buf = [0u8; 4];
        rng.fill(&mut buf)
            .map_err(|_| VerificationError::Crypto("Failed to generate random code".to_string()))?;
        let n = u32::from_be_bytes(buf);
        if n < REJECTION_BOUND {
            return Ok(format!("{:0width$}", n % 1_000_000, width = CODE_LENGTH));
        }
    }
}

/// Generate a fresh code for `email`, persist it and hand it to the notifier.
///
/// Delivery is best-effort on a detached task: a code the user obtains by
/// other means must still be usable, so dispatch failures never unwind the
/// stored row. Previously issued codes stay valid until they expire or get
/// consumed.
pub async fn issue_code(
    email: &str,
    purpose: CodePurpose,
) -> Result<VerificationCode, VerificationError> {
    let code = generate_code()?;
    let row = VerificationCode::new(
        email.to_string(),
        code,
        purpose,
        Duration::minutes(CODE_VALIDITY_MINUTES),
    );

    let stored = CodeStore::create_code(row).await?;
    dispatch_code(&stored.email, &stored.code);

    tracing::info!(email = %stored.email, purpose = %stored.purpose, "Verification code issued");
    Ok(stored)
}

/// Validate and spend a submitted code.
///
/// Fails with `CodeNotFound` when no unconsumed row matches (email, code) and
/// with `CodeExpired` when every matching row's window has passed (the rows
/// are left unconsumed in that case); a still-valid row is always preferred
/// over an expired one with the same digits. On success the row is marked
/// verified; the
/// `verified = FALSE` predicate on the update makes exactly one of any number
/// of concurrent callers win, the rest observe `CodeNotFound`.
pub async fn consume_code(
    email: &str,
    code: &str,
) -> Result<VerificationCode, VerificationError> {
    let row = CodeStore::find_unconsumed(email, code)
        .await?
        .ok_or(VerificationError::CodeNotFound)?;

    if row.is_expired() {
        tracing::debug!(email = %email, "Verification code expired");
        return Err(VerificationError::CodeExpired);
    }

    let id = row
        .id
        .ok_or_else(|| VerificationError::Storage("Stored code has no row id".to_string()))?;

    if !CodeStore::mark_verified(id).await? {
        // A concurrent caller spent the code between lookup and update
        return Err(VerificationError::CodeNotFound);
    }

    tracing::info!(email = %email, purpose = %row.purpose, "Verification code consumed");
    Ok(VerificationCode {
        verified: true,
        ..row
    })
}

/// Most recently issued code for an email, consumed or not
pub async fn latest_code(email: &str) -> Result<Option<VerificationCode>, VerificationError> {
    CodeStore::latest_code(email).await
}

/// Drop every stored code for an email
pub async fn purge_codes(email: &str) -> Result<(), VerificationError> {
    CodeStore::delete_codes(email).await
}
