use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum TokenError {
    /// Structural, signature and expiry failures all collapse here so a
    /// caller cannot tell a forgery probe apart from an expired token.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Signing error: {0}")]
    Signing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(TokenError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            TokenError::Signing("bad key".to_string()).to_string(),
            "Signing error: bad key"
        );
    }

    #[test]
    fn test_error_is_sync_and_send() {
        fn assert_sync_send<T: Sync + Send>() {}
        assert_sync_send::<TokenError>();
    }
}
