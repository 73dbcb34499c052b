use crate::storage::data_store_pools;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::postgres::*;
use super::sqlite::*;

pub struct UserStore;

/// Map an INSERT failure onto the duplicate taxonomy when the database
/// reports a violated UNIQUE constraint, keyed by which column the backend
/// names in its message.
pub(super) fn map_insert_error(err: sqlx::Error) -> UserError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let message = db_err.message();
            if message.contains("email") {
                return UserError::DuplicateEmail;
            }
            if message.contains("username") {
                return UserError::DuplicateUsername;
            }
        }
    }
    UserError::Storage(err.to_string())
}

impl UserStore {
    /// Initialize the user database tables
    pub(crate) async fn init() -> Result<(), UserError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            create_tables_sqlite(&pool).await?;
            validate_user_tables_sqlite(&pool).await?;
            Ok(())
        } else if let Some(pool) = pools.postgres {
            create_tables_postgres(&pool).await?;
            validate_user_tables_postgres(&pool).await?;
            Ok(())
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Look up a single account by email, username or sequence number
    #[tracing::instrument(fields(user_field = %field))]
    pub async fn get_user_by(field: UserSearchField) -> Result<Option<User>, UserError> {
        let pools = data_store_pools();

        let result = if let Some(pool) = pools.sqlite {
            get_user_by_field_sqlite(&pool, &field).await
        } else if let Some(pool) = pools.postgres {
            get_user_by_field_postgres(&pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => {
                tracing::debug!(found = true, "User lookup completed");
            }
            Ok(None) => {
                tracing::debug!(found = false, "User lookup completed - not found");
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
            }
        }

        result
    }

    /// Insert a new account. Duplicate email/username surfaces as
    /// `DuplicateEmail` / `DuplicateUsername` straight from the database
    /// constraint, so two racing inserts cannot both succeed.
    #[tracing::instrument(skip(user), fields(email = %user.email, username = %user.username))]
    pub async fn create_user(user: User) -> Result<User, UserError> {
        let pools = data_store_pools();

        let result = if let Some(pool) = pools.sqlite {
            create_user_sqlite(&pool, user).await
        } else if let Some(pool) = pools.postgres {
            create_user_postgres(&pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => {
                tracing::info!(
                    email = %user.email,
                    sequence_number = user.sequence_number,
                    "User created"
                );
            }
            Err(e) => {
                tracing::debug!(error = %e, "User creation failed");
            }
        }

        result
    }

    /// Persist the mutable fields of an existing account (`enabled`,
    /// `last_login`), keyed by email.
    #[tracing::instrument(skip(user), fields(email = %user.email))]
    pub async fn update_user(user: User) -> Result<User, UserError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            update_user_sqlite(&pool, user).await
        } else if let Some(pool) = pools.postgres {
            update_user_postgres(&pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}
