use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Verification codes table name
pub(super) static DB_TABLE_VERIFICATION_CODES: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_VERIFICATION_CODES")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "verification_codes"))
});
