mod errors;
mod storage;
mod types;

pub use errors::UserError;
pub use storage::UserStore;
pub use types::{User, UserRole, UserSearchField};

pub(crate) async fn init() -> Result<(), UserError> {
    crate::storage::init()
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    UserStore::init().await
}
