use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;

/// User aggregate entity.
///
/// Represents a registered account. The password hash never leaves the domain
/// and outbound layers.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type.
///
/// Opaque string; freshly registered users get a UUID v4. Comparisons are
/// exact, so identifiers taken from tokens or paths are never normalised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4 in hyphenated form
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get user ID as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The original
/// casing is kept; lookups are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Deliberately not `Display`; the value only travels to the hasher.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;

    /// Accept a password of at least `MIN_LENGTH` characters.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than `MIN_LENGTH` characters (Unicode scalar values)
    pub fn new(password: String) -> Result<Self, PasswordError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct SignUpCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub name: Option<String>,
}

impl SignUpCommand {
    /// Construct a new sign-up command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Policy-checked password (will be hashed by service)
    /// * `name` - Optional display name
    pub fn new(email: EmailAddress, password: Password, name: Option<String>) -> Self {
        Self {
            email,
            password,
            name,
        }
    }
}

/// An authenticated user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Current time at storage precision (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
