use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. The algorithm is pinned to HS256 (HMAC with
/// SHA-256): tokens whose header names any other algorithm, `none` included,
/// are rejected.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token.
    ///
    /// The `exp` claim is required and checked without leeway.
    ///
    /// # Errors
    /// * `ExpiredToken` - Token has expired
    /// * `MalformedToken` - Signature, algorithm, structure or claims are invalid
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::MalformedToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::Utc;

    use super::*;
    use crate::jwt::Claims;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        exp: i64,
    }

    fn future() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);

        let claims = TestClaims {
            sub: "user123".to_string(),
            exp: future(),
        };

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = TestClaims {
            sub: "user123".to_string(),
            exp: future(),
        };

        let token = handler1.encode(&claims).expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new()
            .with_subject("user123")
            .with_expiration(Utc::now().timestamp() - 10);
        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode::<Claims>(&token);
        assert_eq!(result, Err(JwtError::ExpiredToken));
    }

    #[test]
    fn test_decode_requires_expiration() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new().with_subject("user123");
        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_rejects_other_hmac_algorithm() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new()
            .with_subject("user123")
            .with_expiration(future());
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode token");

        let result = handler.decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_rejects_unsigned_token() {
        let handler = JwtHandler::new(SECRET);

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user123","exp":{}}}"#, future()));
        let token = format!("{}.{}.", header, payload);

        let result = handler.decode::<Claims>(&token);
        assert!(matches!(result, Err(JwtError::MalformedToken(_))));
    }

    #[test]
    fn test_decode_rejects_tampered_payload() {
        let handler = JwtHandler::new(SECRET);

        let claims = Claims::new()
            .with_subject("user123")
            .with_expiration(future());
        let token = handler.encode(&claims).expect("Failed to encode token");

        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"admin","exp":{}}}"#, future()));
        parts[1] = &forged;
        let tampered = parts.join(".");

        let result = handler.decode::<Claims>(&tampered);
        assert!(matches!(result, Err(JwtError::MalformedToken(_))));
    }
}
