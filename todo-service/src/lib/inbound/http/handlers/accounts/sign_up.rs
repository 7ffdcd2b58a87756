use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use thiserror::Error;

use super::session_cookie;
use super::SessionResponseData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::SignUpCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordError;

pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let Json(body) = body?;
    let session = state.user_service.sign_up(body.try_into_command()?).await?;

    let jar = jar.add(session_cookie(&state.cookie_name, session.token.clone()));

    Ok((
        jar,
        ApiSuccess::new(StatusCode::CREATED, (&session).into()),
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequest {
    email: String,
    password: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseSignUpRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("{0}")]
    Password(#[from] PasswordError),
}

impl SignUpRequest {
    fn try_into_command(self) -> Result<SignUpCommand, ParseSignUpRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(SignUpCommand::new(email, password, self.name))
    }
}

impl From<ParseSignUpRequestError> for ApiError {
    fn from(err: ParseSignUpRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let command = request("a@x.com", "secret1").try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "a@x.com");
        assert_eq!(command.password.as_str(), "secret1");
    }

    #[test]
    fn test_short_password_is_bad_request() {
        let err = ApiError::from(request("a@x.com", "12345").try_into_command().unwrap_err());
        assert_eq!(
            err,
            ApiError::BadRequest("Password must be at least 6 characters long".to_string())
        );
    }

    #[test]
    fn test_malformed_email_is_bad_request() {
        let err = ApiError::from(
            request("not-an-email", "secret1")
                .try_into_command()
                .unwrap_err(),
        );
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_name_is_optional() {
        let body: SignUpRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"secret1"}"#).unwrap();
        assert_eq!(body.name, None);
    }
}
