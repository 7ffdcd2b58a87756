use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::errors::PasswordError;

/// PBKDF2 work factor.
pub const ITERATIONS: u32 = 100_000;

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 32;

/// Derived key length in bytes (SHA-256 digest size).
pub const KEY_LENGTH: usize = 32;

const SEPARATOR: char = '$';

/// Password hashing implementation.
///
/// Stored format is `base64(salt)$base64(key)` where the key is derived with
/// PBKDF2-HMAC-SHA256.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Encoded `salt$key` string
    ///
    /// # Errors
    /// * `HashingFailed` - The OS random number generator failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        let key = derive_key(password, &salt);

        Ok(format!(
            "{}{}{}",
            STANDARD.encode(salt),
            SEPARATOR,
            STANDARD.encode(key)
        ))
    }

    /// Verify a password against a stored hash.
    ///
    /// Any malformed stored value yields `false`.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate password
    /// * `stored` - Previously produced `salt$key` string
    ///
    /// # Returns
    /// True if the candidate derives the stored key
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt, expected)) = parse_stored(stored) else {
            return false;
        };

        let key = derive_key(password, &salt);
        constant_time_eq(&key, &expected)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LENGTH] {
    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut key);
    key
}

fn parse_stored(stored: &str) -> Option<(Vec<u8>, Vec<u8>)> {
    let mut parts = stored.split(SEPARATOR);
    let salt = parts.next()?;
    let key = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let salt = STANDARD.decode(salt).ok()?;
    let key = STANDARD.decode(key).ok()?;
    if salt.is_empty() || key.len() != KEY_LENGTH {
        return None;
    }

    Some((salt, key))
}

/// Constant-time byte comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
