use chrono::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CODE_LENGTH: usize = 6;
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;
/// Minimum used on the page reached through an emailed recovery link.
pub const LINK_PASSWORD_MIN_LENGTH: usize = 8;
pub const CODE_TTL_MINUTES: i64 = 30;

/// Which system is the source of truth for code validity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetMode {
    /// One-time code issued and verified by the identity service.
    #[default]
    Otp,
    /// Numeric code kept in the `verification_codes` table and mailed by
    /// the verification function.
    CodeTable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetPolicy {
    pub code_length: usize,
    pub password_min_length: usize,
    pub code_ttl: Duration,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            password_min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            code_ttl: Duration::minutes(CODE_TTL_MINUTES),
        }
    }
}

impl ResetPolicy {
    pub fn with_password_min_length(mut self, min_length: usize) -> Self {
        self.password_min_length = min_length;
        self
    }
}
