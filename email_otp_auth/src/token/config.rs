use std::{env, sync::LazyLock};

/// Minimum signing key length in bytes. HS256 demands at least 256 bits of
/// key material; anything shorter is refused at startup.
const MIN_SECRET_BYTES: usize = 32;

/// Symmetric signing key for access tokens. Rotating it invalidates every
/// outstanding token.
pub(super) static AUTH_TOKEN_SECRET: LazyLock<Vec<u8>> = LazyLock::new(|| {
    let secret = env::var("AUTH_TOKEN_SECRET").expect("AUTH_TOKEN_SECRET must be set");
    assert!(
        secret.len() >= MIN_SECRET_BYTES,
        "AUTH_TOKEN_SECRET must be at least {MIN_SECRET_BYTES} bytes"
    );
    secret.into_bytes()
});

/// Access token validity in seconds
pub(crate) static AUTH_TOKEN_VALIDITY: LazyLock<u64> = LazyLock::new(|| {
    env::var("AUTH_TOKEN_VALIDITY")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3600) // Default to 1 hour if not set or invalid
});
