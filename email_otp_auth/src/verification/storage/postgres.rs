use sqlx::{Pool, Postgres};

use crate::storage::validate_postgres_table_schema;
use crate::verification::{errors::VerificationError, types::VerificationCode};

use super::config::DB_TABLE_VERIFICATION_CODES;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    // No uniqueness across rows: several live codes per email are permitted
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL,
            code TEXT NOT NULL,
            purpose TEXT NOT NULL,
            expires_at TIMESTAMPTZ NOT NULL,
            verified BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    Ok(())
}

/// Validates that the verification codes table schema matches what we expect
pub(super) async fn validate_code_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), VerificationError> {
    let codes_table = DB_TABLE_VERIFICATION_CODES.as_str();

    // Define expected schema (column name, data type)
    let expected_columns = vec![
        ("id", "bigint"),
        ("email", "text"),
        ("code", "text"),
        ("purpose", "text"),
        ("expires_at", "timestamp with time zone"),
        ("verified", "boolean"),
        ("created_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(
        pool,
        codes_table,
        &expected_columns,
        VerificationError::Storage,
    )
    .await
}

pub(super) async fn create_code_postgres(
    pool: &Pool<Postgres>,
    code: VerificationCode,
) -> Result<VerificationCode, VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    sqlx::query_as::<_, VerificationCode>(&format!(
        r#"
        INSERT INTO {table_name} (email, code, purpose, expires_at, verified, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#
    ))
    .bind(&code.email)
    .bind(&code.code)
    .bind(code.purpose.as_str())
    .bind(code.expires_at)
    .bind(code.verified)
    .bind(code.created_at)
    .fetch_one(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))
}

pub(super) async fn find_unconsumed_postgres(
    pool: &Pool<Postgres>,
    email: &str,
    code: &str,
) -> Result<Option<VerificationCode>, VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    // Prefer rows still inside their validity window, so a digit collision
    // with an expired row cannot mask a live code
    sqlx::query_as::<_, VerificationCode>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE email = $1 AND code = $2 AND verified = FALSE
        ORDER BY (expires_at > $3) DESC, created_at DESC, id DESC
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
pub(super) async fn mark_verified_postgres(
    pool: &Pool<Postgres>,
    id: i64,
) -> Result<bool, VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    let result = sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET verified = TRUE WHERE id = $1 AND verified = FALSE
        "#
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    Ok(result.rows_affected() > 0)
}

pub(super) async fn latest_code_postgres(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<VerificationCode>, VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    sqlx::query_as::<_, VerificationCode>(&format!(
        r#"
        SELECT * FROM {table_name}
        WHERE email = $1
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))
}

pub(super) async fn delete_codes_postgres(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<(), VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_CODES.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {table_name} WHERE email = $1
        "#
    ))
    .bind(email)
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    Ok(())
}
