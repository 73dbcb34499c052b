mod config;
mod engine;
mod errors;
mod storage;
mod types;

pub use engine::{consume_code, issue_code, latest_code, purge_codes};
pub use errors::VerificationError;
pub use types::{CodePurpose, VerificationCode};

pub(crate) use storage::CodeStore;

pub(crate) async fn init() -> Result<(), VerificationError> {
    crate::storage::init()
        .await
        .map_err(|e| VerificationError::Storage(e.to_string()))?;

    CodeStore::init().await
}
