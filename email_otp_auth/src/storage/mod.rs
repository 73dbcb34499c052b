mod data_store;
mod errors;
mod schema_validation;

pub(crate) async fn init() -> Result<(), errors::StorageError> {
    let pools = data_store::data_store_pools();
    if pools.sqlite.is_none() && pools.postgres.is_none() {
        return Err(errors::StorageError::Storage(
            "Unsupported database type".to_string(),
        ));
    }

    Ok(())
}

pub(crate) use data_store::{DB_TABLE_PREFIX, data_store_pools};

// Re-export schema validation functions for internal use
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
