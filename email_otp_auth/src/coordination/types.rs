use serde::{Deserialize, Serialize};

use crate::userdb::UserRole;

/// Payload handed to a caller that completed the two-factor login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed bearer token carrying subject and role
    pub access_token: String,
    /// Random opaque string echoed to the caller; this crate neither
    /// persists nor validates it
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    pub role: String,
    pub username: String,
    pub email: String,
}

/// An authenticated caller, derived from a fully verified access token.
///
/// The explicit replacement for ambient per-thread security state: every
/// operation that needs the caller's identity takes one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub subject: String,
    pub role: UserRole,
}

impl Principal {
    /// True iff the principal carries the required role
    pub fn has_role(&self, required: UserRole) -> bool {
        self.role == required
    }
}
