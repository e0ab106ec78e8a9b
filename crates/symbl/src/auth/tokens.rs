//! Bearer token type.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

/// A bearer token for authenticated API requests.
///
/// Tokens are short-lived and carry the expiry declared by the server when
/// they were issued. A session replaces its token wholesale; a token value is
/// never edited after issue.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Create a token with an absolute expiry.
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Create a token that expires `expires_in_secs` seconds from now.
    ///
    /// Lifetimes beyond what `DateTime` can represent saturate at
    /// [`DateTime::<Utc>::MAX_UTC`] (or `MIN_UTC` when negative).
    pub fn expiring_in(value: impl Into<String>, expires_in_secs: i64) -> Self {
        let expires_at = TimeDelta::try_seconds(expires_in_secs)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .unwrap_or(if expires_in_secs < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });
        Self::new(value, expires_at)
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the moment the server declared this token invalid.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true once the declared expiry has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
