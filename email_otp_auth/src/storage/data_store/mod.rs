mod config;

use sqlx::{Pool, Postgres, Sqlite};

pub(crate) use config::{DB_TABLE_PREFIX, GENERIC_DATA_STORE};

/// Pool handles for the configured backend.
///
/// Exactly one of the two fields is populated. Cloning a pool is an `Arc`
/// bump, so every store method takes its own handle and runs statements
/// without any process-wide lock.
#[derive(Clone)]
pub(crate) struct DataPools {
    pub(crate) sqlite: Option<Pool<Sqlite>>,
    pub(crate) postgres: Option<Pool<Postgres>>,
}

pub(crate) fn data_store_pools() -> DataPools {
    GENERIC_DATA_STORE.clone()
}
