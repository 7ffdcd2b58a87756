use std::sync::Arc;

use thiserror::Error;

use crate::authenticator::Authenticator;
use crate::jwt::JwtError;

/// Authorization failures.
///
/// Everything except `Forbidden` means the caller could not be identified;
/// `Forbidden` means the caller was identified as someone else.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token: {0}")]
    MalformedToken(String),

    #[error("Token is missing the subject claim")]
    MissingSubject,

    #[error("Not allowed to act on behalf of user {requested}")]
    Forbidden { requested: String },
}

impl AuthorizationError {
    /// True when the caller is authenticated but not the requested identity.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthorizationError::Forbidden { .. })
    }
}

impl From<JwtError> for AuthorizationError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AuthorizationError::ExpiredToken,
            JwtError::MissingSubject => AuthorizationError::MissingSubject,
            JwtError::MalformedToken(msg) | JwtError::EncodingFailed(msg) => {
                AuthorizationError::MalformedToken(msg)
            }
        }
    }
}

/// Proves that the bearer of a token may act as a given user.
#[derive(Clone)]
pub struct AuthorizationGuard {
    authenticator: Arc<Authenticator>,
}

impl AuthorizationGuard {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Resolve a raw token to the identity it was issued for.
    ///
    /// # Errors
    /// * `ExpiredToken`, `MalformedToken`, `MissingSubject` - Token rejected
    pub fn authenticate(&self, raw_token: &str) -> Result<String, AuthorizationError> {
        Ok(self.authenticator.validate_token(raw_token)?)
    }

    /// Resolve a raw token and require it to belong to `path_user_id`.
    ///
    /// Comparison is an exact string match.
    ///
    /// # Returns
    /// The verified user identifier
    ///
    /// # Errors
    /// * `ExpiredToken`, `MalformedToken`, `MissingSubject` - Token rejected
    /// * `Forbidden` - Token is valid but belongs to a different user
    pub fn authorize(
        &self,
        raw_token: &str,
        path_user_id: &str,
    ) -> Result<String, AuthorizationError> {
        let subject = self.authenticate(raw_token)?;

        if subject != path_user_id {
            return Err(AuthorizationError::Forbidden {
                requested: path_user_id.to_string(),
            });
        }

        Ok(subject)
    }
}
