use auth::AuthenticationError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy and hashing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already registered")]
    EmailAlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token generation failed: {0}")]
    TokenIssuance(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => {
                UserError::Password(PasswordError::HashingFailed(e.to_string()))
            }
            AuthenticationError::JwtError(e) => UserError::TokenIssuance(e.to_string()),
        }
    }
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Password(PasswordError::HashingFailed(err.to_string()))
    }
}

impl From<auth::JwtError> for UserError {
    fn from(err: auth::JwtError) -> Self {
        UserError::TokenIssuance(err.to_string())
    }
}
