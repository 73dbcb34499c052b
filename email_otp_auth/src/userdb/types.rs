use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role claim carried by an account and embedded into access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A registered account identity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Database-assigned sequence number (primary key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<i64>,
    /// Unique e-mail address, the login identifier
    pub email: String,
    /// Unique public account name
    pub username: String,
    /// One-way password hash, never the plaintext
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Role granted at creation; immutable through this crate
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    /// Whether the e-mail address has been verified
    pub enabled: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the account last completed a two-factor login
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new, disabled account with the default role
    pub fn new(email: String, username: String, password_hash: String) -> Self {
        Self {
            sequence_number: None,
            email,
            username,
            password_hash,
            role: UserRole::User,
            enabled: false,
            created_at: Utc::now(),
            last_login: None,
        }
    }
}

/// Lookup key for [`UserStore::get_user_by`](super::UserStore::get_user_by)
#[derive(Debug, Clone)]
pub enum UserSearchField {
    Email(String),
    Username(String),
    SequenceNumber(i64),
}

impl std::fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserSearchField::Email(email) => write!(f, "email={email}"),
            UserSearchField::Username(username) => write!(f, "username={username}"),
            UserSearchField::SequenceNumber(n) => write!(f, "sequence_number={n}"),
        }
    }
}
