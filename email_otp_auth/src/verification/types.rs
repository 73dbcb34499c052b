use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What an issued code proves once consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CodePurpose {
    Registration,
    Login,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "REGISTRATION",
            CodePurpose::Login => "LOGIN",
        }
    }
}

impl std::fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTRATION" => Ok(CodePurpose::Registration),
            "LOGIN" => Ok(CodePurpose::Login),
            other => Err(format!("Unknown code purpose: {other}")),
        }
    }
}

impl TryFrom<String> for CodePurpose {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single-use numeric credential mailed to an account's address.
///
/// Rows are durable; consumption flips `verified` exactly once per row.
/// Several unconsumed rows may exist for the same email at the same time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VerificationCode {
    /// Database-assigned row id (primary key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Email the code was issued for
    pub email: String,
    /// Zero-padded numeric digits
    pub code: String,
    #[sqlx(try_from = "String")]
    pub purpose: CodePurpose,
    /// Past this instant the code is rejected even if unused
    pub expires_at: DateTime<Utc>,
    /// Single-use marker; set once, never cleared
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn new(email: String, code: String, purpose: CodePurpose, validity: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            email,
            code,
            purpose,
            expires_at: now + validity,
            verified: false,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
