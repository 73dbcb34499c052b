use serde::{Deserialize, Serialize};

/// Claims carried by a signed access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject: the account's e-mail address
    pub sub: String,
    /// Role claim (USER or ADMIN)
    pub role: String,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}
