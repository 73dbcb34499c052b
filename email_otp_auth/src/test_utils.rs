//! Test utilities module for shared test initialization and helpers
//!
//! Provides centralized test setup so every test module runs against the
//! same environment configuration and an initialized test database.

use std::sync::Once;

/// Load `.env_test` (falling back to `.env`) exactly once per process and
/// reset the on-disk test database. Safe to call from synchronous tests
/// that only need configuration (tokens, password hashing).
pub(crate) fn load_test_env() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        // Start from an empty database file; in-memory URLs have nothing to remove
        if let Ok(url) = std::env::var("GENERIC_DATA_STORE_URL") {
            if let Some(path) = url.strip_prefix("sqlite:") {
                if !path.contains(":memory:") {
                    // Missing file is fine
                    let _ = std::fs::remove_file(path);
                }
            }
        }
    });
}

/// Centralized test initialization for store-backed tests
///
/// Loads the test environment and makes sure the user and verification code
/// tables exist. Table creation is idempotent, so repeated calls are cheap.
pub(crate) async fn init_test_environment() {
    load_test_env();

    if let Err(e) = crate::userdb::init().await {
        eprintln!("Warning: Failed to initialize UserStore: {e}");
    }
    if let Err(e) = crate::verification::init().await {
        eprintln!("Warning: Failed to initialize CodeStore: {e}");
    }
}
