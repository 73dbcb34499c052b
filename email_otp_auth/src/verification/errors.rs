use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum VerificationError {
    /// Covers never-issued, wrong digits and already-consumed alike; the
    /// caller is not told which condition failed.
    #[error("Verification code not found or already used")]
    CodeNotFound,

    #[error("Verification code has expired")]
    CodeExpired,

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
