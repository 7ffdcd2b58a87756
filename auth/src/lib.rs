//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the to-do service:
//! - Password hashing (PBKDF2-HMAC-SHA256, `salt$key` encoding)
//! - JWT session token generation and validation (HS256 only)
//! - Ownership checks between a token subject and a requested user
//!
//! Nothing here depends on the HTTP framework; the service extracts the raw
//! token and maps the errors to status codes.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let hash = auth.hash_password("password123").unwrap();
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "user123");
//! ```
//!
//! ## Ownership
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, AuthorizationGuard};
//!
//! let auth = Arc::new(Authenticator::new(b"secret_key_at_least_32_bytes_long!"));
//! let guard = AuthorizationGuard::new(Arc::clone(&auth));
//!
//! let token = auth.issue_token("alice").unwrap();
//! assert!(guard.authorize(&token, "alice").is_ok());
//! assert!(guard.authorize(&token, "bob").unwrap_err().is_forbidden());
//! ```

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::SESSION_TTL_DAYS;
pub use guard::AuthorizationError;
pub use guard::AuthorizationGuard;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
