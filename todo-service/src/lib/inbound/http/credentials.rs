use axum::http::header;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use thiserror::Error;

/// Default name of the session cookie.
pub const DEFAULT_SESSION_COOKIE: &str = "better-auth.session_token";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No authentication credentials provided")]
    NoCredentials,
}

/// One place a raw session token may be carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `Authorization: Bearer <token>`; the scheme is case-insensitive.
    BearerHeader,
    /// Session cookie with the given name.
    Cookie(String),
}

impl CredentialSource {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        let token = match self {
            CredentialSource::BearerHeader => {
                let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
                let (scheme, token) = value.split_once(' ')?;
                if !scheme.eq_ignore_ascii_case("bearer") {
                    return None;
                }
                token.trim().to_string()
            }
            CredentialSource::Cookie(name) => CookieJar::from_headers(headers)
                .get(name)?
                .value()
                .to_string(),
        };

        (!token.is_empty()).then_some(token)
    }
}

/// Pulls the raw token from the first source that carries one.
///
/// Sources are tried in order and never merged.
#[derive(Debug, Clone)]
pub struct CredentialExtractor {
    sources: Vec<CredentialSource>,
}

impl CredentialExtractor {
    pub fn new(sources: Vec<CredentialSource>) -> Self {
        Self { sources }
    }

    /// Bearer header first, then the named session cookie.
    pub fn header_then_cookie(cookie_name: impl Into<String>) -> Self {
        Self::new(vec![
            CredentialSource::BearerHeader,
            CredentialSource::Cookie(cookie_name.into()),
        ])
    }

    pub fn sources(&self) -> &[CredentialSource] {
        &self.sources
    }

    /// # Errors
    /// * `NoCredentials` - No source carried a non-empty token
    pub fn extract(&self, headers: &HeaderMap) -> Result<String, CredentialError> {
        self.sources
            .iter()
            .find_map(|source| source.extract(headers))
            .ok_or(CredentialError::NoCredentials)
    }
}
