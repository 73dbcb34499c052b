use crate::storage::data_store_pools;
use crate::verification::{errors::VerificationError, types::VerificationCode};

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct CodeStore;

impl CodeStore {
    /// Initialize the verification code tables
    pub(crate) async fn init() -> Result<(), VerificationError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            create_tables_sqlite(&pool).await?;
            validate_code_tables_sqlite(&pool).await?;
            Ok(())
        } else if let Some(pool) = pools.postgres {
            create_tables_postgres(&pool).await?;
            validate_code_tables_postgres(&pool).await?;
            Ok(())
        } else {
            Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Persist a freshly generated code row
    #[tracing::instrument(skip(code), fields(email = %code.email, purpose = %code.purpose))]
    pub(crate) async fn create_code(
        code: VerificationCode,
    ) -> Result<VerificationCode, VerificationError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            create_code_sqlite(&pool, code).await
        } else if let Some(pool) = pools.postgres {
            create_code_postgres(&pool, code).await
        } else {
            Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Find an unconsumed row matching (email, code), preferring rows still
    /// inside their validity window
    #[tracing::instrument(skip(code))]
    pub(crate) async fn find_unconsumed(
        email: &str,
        code: &str,
    ) -> Result<Option<VerificationCode>, VerificationError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            find_unconsumed_sqlite(&pool, email, code).await
        } else if let Some(pool) = pools.postgres {
            find_unconsumed_postgres(&pool, email, code).await
        } else {
            Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Spend the row; returns false when another caller already did
    #[tracing::instrument]
    pub(crate) async fn mark_verified(id: i64) -> Result<bool, VerificationError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            mark_verified_sqlite(&pool, id).await
        } else if let Some(pool) = pools.postgres {
            mark_verified_postgres(&pool, id).await
        } else {
            Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Most recently issued row for an email
    #[tracing::instrument]
    pub(crate) async fn latest_code(
        email: &str,
    ) -> Result<Option<VerificationCode>, VerificationError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            latest_code_sqlite(&pool, email).await
        } else if let Some(pool) = pools.postgres {
            latest_code_postgres(&pool, email).await
        } else {
            Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Delete every row for an email
    #[tracing::instrument]
    pub(crate) async fn delete_codes(email: &str) -> Result<(), VerificationError> {
        let pools = data_store_pools();

        if let Some(pool) = pools.sqlite {
            delete_codes_sqlite(&pool, email).await
        } else if let Some(pool) = pools.postgres {
            delete_codes_postgres(&pool, email).await
        } else {
            Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_environment;
    use crate::verification::types::CodePurpose;
    use chrono::{Duration, Utc};
    use serial_test::serial;

    fn test_row(email: &str, code: &str) -> VerificationCode {
        VerificationCode::new(
            email.to_string(),
            code.to_string(),
            CodePurpose::Registration,
            Duration::minutes(5),
        )
    }

    fn test_email(suffix: &str) -> String {
        format!(
            "store-{suffix}-{}@example.com",
            Utc::now().timestamp_micros()
        )
    }

    /// Test CodeStore initialization is idempotent
    #[tokio::test]
    #[serial]
    async fn test_codestore_init() {
        init_test_environment().await;

        assert!(CodeStore::init().await.is_ok());
        assert!(CodeStore::init().await.is_ok());
    }

    /// Created rows come back with an id and the original fields
    #[tokio::test]
    #[serial]
    async fn test_codestore_create_and_find() {
        init_test_environment().await;
        let email = test_email("create");

        let created = CodeStore::create_code(test_row(&email, "123456"))
            .await
            .expect("Creating a code should succeed");
        assert!(created.id.is_some());
        assert_eq!(created.code, "123456");
        assert!(!created.verified);

        let found = CodeStore::find_unconsumed(&email, "123456")
            .await
            .expect("Lookup should succeed")
            .expect("The unconsumed row should be found");
        assert_eq!(found.id, created.id);

        // Wrong digits match nothing
        let missing = CodeStore::find_unconsumed(&email, "999999")
            .await
            .expect("Lookup should succeed");
        assert!(missing.is_none());
    }

    /// mark_verified flips the row exactly once
    #[tokio::test]
    #[serial]
    async fn test_codestore_mark_verified_once() {
        init_test_environment().await;
        let email = test_email("mark");

        let created = CodeStore::create_code(test_row(&email, "222333"))
            .await
            .expect("Creating a code should succeed");
        let id = created.id.expect("row id assigned");

        let first = CodeStore::mark_verified(id)
            .await
            .expect("First mark should succeed");
        assert!(first, "First caller performs the flip");

        let second = CodeStore::mark_verified(id)
            .await
            .expect("Second mark should succeed");
        assert!(!second, "Second caller finds the row already spent");

        // A verified row no longer satisfies the unconsumed lookup
        let found = CodeStore::find_unconsumed(&email, "222333")
            .await
            .expect("Lookup should succeed");
        assert!(found.is_none());
    }

    /// find_unconsumed prefers a row inside its validity window over a newer
    /// expired one carrying the same digits
    #[tokio::test]
    #[serial]
    async fn test_codestore_find_prefers_unexpired() {
        init_test_environment().await;
        let email = test_email("prefer");

        let live = CodeStore::create_code(VerificationCode::new(
            email.clone(),
            "555666".to_string(),
            CodePurpose::Registration,
            Duration::minutes(5),
        ))
        .await
        .expect("Insert should succeed");

        CodeStore::create_code(VerificationCode::new(
            email.clone(),
            "555666".to_string(),
            CodePurpose::Registration,
            Duration::minutes(-1),
        ))
        .await
        .expect("Insert should succeed");

        let found = CodeStore::find_unconsumed(&email, "555666")
            .await
            .expect("Lookup should succeed")
            .expect("A row should be found");
        assert_eq!(found.id, live.id);
        assert!(!found.is_expired());
    }

    /// latest_code returns the newest row for the email
    #[tokio::test]
    #[serial]
    async fn test_codestore_latest_code() {
        init_test_environment().await;
        let email = test_email("latest");

        CodeStore::create_code(test_row(&email, "111111"))
            .await
            .expect("First insert should succeed");
        CodeStore::create_code(test_row(&email, "222222"))
            .await
            .expect("Second insert should succeed");

        let latest = CodeStore::latest_code(&email)
            .await
            .expect("latest_code should succeed")
            .expect("A row should be found");
        assert_eq!(latest.code, "222222");

        let none = CodeStore::latest_code("nobody@example.com")
            .await
            .expect("latest_code should succeed");
        assert!(none.is_none());
    }

    /// delete_codes removes all rows for the email and nothing else
    #[tokio::test]
    #[serial]
    async fn test_codestore_delete_codes() {
        init_test_environment().await;
        let email = test_email("delete");
        let other = test_email("delete-other");

        CodeStore::create_code(test_row(&email, "111111"))
            .await
            .expect("Insert should succeed");
        CodeStore::create_code(test_row(&other, "333444"))
            .await
            .expect("Insert should succeed");

        CodeStore::delete_codes(&email)
            .await
            .expect("Delete should succeed");

        assert!(
            CodeStore::latest_code(&email)
                .await
                .expect("latest_code should succeed")
                .is_none()
        );
        assert!(
            CodeStore::latest_code(&other)
                .await
                .expect("latest_code should succeed")
                .is_some(),
            "Other emails' rows must be untouched"
        );
    }
}
