/// Number of digits in a verification code
pub(crate) const CODE_LENGTH: usize = 6;

/// How long an issued code stays valid, in minutes
pub(crate) const CODE_VALIDITY_MINUTES: i64 = 5;
