use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Standard RFC 7519 registered claims only. Every field is optional on the
/// wire so a token lacking `sub` still decodes and can be reported precisely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject, issued now and expiring after `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, iat and exp set
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(subject.to_string()),
            exp: Some((now + ttl).timestamp()),
            iat: Some(now.timestamp()),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is only valid strictly before its expiry; claims without
    /// `exp` are treated as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}
