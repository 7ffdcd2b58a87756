use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Lifetime of every session token. Fixed policy, not configurable.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Well-formed hash that matches no password, verified against when the
/// account does not exist so both sign-in failure paths cost one derivation.
const DECOY_HASH: &str =
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

/// Authentication coordinator combining password verification and JWT generation.
///
/// This is the token service: it mints session tokens for a subject and
/// resolves a presented token back to its subject.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator issuing tokens valid for `SESSION_TTL_DAYS`.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl: Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash. Malformed hashes never match.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identity to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a sign-in attempt for an account that does not exist.
    ///
    /// Runs one key derivation so the response time matches a wrong password.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, DECOY_HASH);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a session token for `subject` without password verification.
    ///
    /// Used right after registration.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.token_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a session token and return its subject.
    ///
    /// # Errors
    /// * `ExpiredToken` - Current time is at or past `exp`
    /// * `MalformedToken` - Signature, algorithm or structure invalid
    /// * `MissingSubject` - Token has no (or an empty) `sub` claim
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::ExpiredToken);
        }

        match claims.sub {
            Some(subject) if !subject.is_empty() => Ok(subject),
            _ => Err(JwtError::MissingSubject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, "user123")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());

        let subject = authenticator
            .validate_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(subject, "user123");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_stored_hash() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.authenticate("my_password", "garbage", "user123");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_reject_unknown_account() {
        let authenticator = Authenticator::new(SECRET);

        assert!(!authenticator.verify_password("", DECOY_HASH));
        assert!(matches!(
            authenticator.reject_unknown_account("anything"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_issue_and_validate_token() {
        let authenticator = Authenticator::new(SECRET);

        let token = authenticator
            .issue_token("user123")
            .expect("Failed to issue token");

        let subject = authenticator
            .validate_token(&token)
            .expect("Failed to validate token");
        assert_eq!(subject, "user123");
    }

    #[test]
    fn test_issued_token_expires_after_seven_days() {
        let authenticator = Authenticator::new(SECRET);
        let handler = JwtHandler::new(SECRET);

        let token = authenticator
            .issue_token("user123")
            .expect("Failed to issue token");
        let claims: Claims = handler.decode(&token).expect("Failed to decode token");

        assert_eq!(
            claims.exp.unwrap() - claims.iat.unwrap(),
            SESSION_TTL_DAYS * 24 * 60 * 60
        );
    }

    #[test]
    fn test_validate_expired_token() {
        let authenticator = Authenticator::new(SECRET);
        let handler = JwtHandler::new(SECRET);

        let now = Utc::now().timestamp();
        let claims = Claims::new()
            .with_subject("user123")
            .with_issued_at(now - 8 * 24 * 60 * 60)
            .with_expiration(now - 24 * 60 * 60);
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::ExpiredToken)
        );
    }

    #[test]
    fn test_validate_token_without_subject() {
        let authenticator = Authenticator::new(SECRET);
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new().with_expiration(Utc::now().timestamp() + 3600);
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::MissingSubject)
        );
    }

    #[test]
    fn test_validate_token_with_empty_subject() {
        let authenticator = Authenticator::new(SECRET);
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new()
            .with_subject("")
            .with_expiration(Utc::now().timestamp() + 3600);
        let token = handler.encode(&claims).expect("Failed to encode token");

        assert_eq!(
            authenticator.validate_token(&token),
            Err(JwtError::MissingSubject)
        );
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::MalformedToken(_))));
    }
}
