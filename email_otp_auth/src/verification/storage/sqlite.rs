use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::verification::{errors::VerificationError, types::VerificationCode};

use super::config::DB_TABLE_VERIFICATION_CODES;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    // No uniqueness across rows: several live codes per email are permitted
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL,
            code TEXT NOT NULL,
            purpose TEXT NOT NULL,
            expires_at TIMESTAMP NOT NULL,
            verified BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the verification codes table schema matches what we expect
pub(super) async fn validate_code_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), VerificationError> {
    let codes_table = DB_TABLE_VERIFICATION_CODES.as_str();

    // Define expected schema (column name, data type)
    let expected_columns = vec![
        ("id", "INTEGER"),
        ("email", "TEXT"),
        ("code", "TEXT"),
        ("purpose", "TEXT"),
        ("expires_at", "TIMESTAMP"),
        ("verified", "BOOLEAN"),
        ("created_at", "TIMESTAMP"),
    ];

    validate_sqlite_table_schema(
        pool,
        codes_table,
        &expected_columns,
        VerificationError::Storage,
    )
    .await
}

pub(super) async fn create_code_sqlite(
    pool: &Pool<Sqlite>,
    code: VerificationCode,
) -> Result<VerificationCode, VerificationError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    let result = sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (email, code, purpose, expires_at, verified, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#
    ))
    .bind(&code.email)
    .bind(&code.code)
    .bind(code.purpose.as_str())
    .bind(code.expires_at)
    .bind(code.verified)
    .bind(code.created_at)
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    // Fetch by rowid to pick up the assigned id
    sqlx::query_as::<_, VerificationCode>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = ?
        "#
    ))
    .bind(result.last_insert_rowid())
    .fetch_one(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))
}

pub(super) async fn find_unconsumed_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
    code: &str,
) -> Result<Option<VerificationCode>, VerificationError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    // Prefer rows still inside their validity window, so a digit collision
    // with an expired row cannot mask a live code
    sqlx::query_as::<_, VerificationCode>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE email = ? AND code = ? AND verified = FALSE
        ORDER BY (expires_at > ?) DESC, created_at DESC, id DESC
        LIMIT 1
        "#
    ))
    .bind(email)
    .bind(code)
    .bind(chrono::Utc::now())
    .fetch_optional(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))
}

/// Compare-and-swap consumption: flips `verified` only if still unset.
/// Returns whether this caller performed the flip.
pub(super) async fn mark_verified_sqlite(
    pool: &Pool<Sqlite>,
    id: i64,
) -> Result<bool, VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET verified = TRUE WHERE id = ? AND verified = FALSE
        "#
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    Ok(result.rows_affected() > 0)
}

pub(super) async fn latest_code_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<VerificationCode>, VerificationError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    sqlx::query_as::<_, VerificationCode>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE email = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))
}

pub(super) async fn delete_codes_sqlite(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<(), VerificationError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE email = ?
        "#
    ))
    .bind(email)
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    Ok(())
}
