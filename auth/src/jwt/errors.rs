use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token is invalid: {0}")]
    MalformedToken(String),

    #[error("Token is missing the subject claim")]
    MissingSubject,
}
