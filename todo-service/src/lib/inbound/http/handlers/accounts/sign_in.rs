use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::session_cookie;
use super::SessionResponseData;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let Json(body) = body?;

    // A malformed address cannot belong to any account
    let email = EmailAddress::new(body.email).map_err(|_| UserError::InvalidCredentials)?;

    let session = state
        .user_service
        .sign_in(&email, &body.password)
        .await
        .inspect_err(|e| {
            if matches!(e, UserError::InvalidCredentials) {
                tracing::warn!("Sign-in rejected");
            }
        })?;

    let jar = jar.add(session_cookie(&state.cookie_name, session.token.clone()));

    Ok((jar, ApiSuccess::new(StatusCode::OK, (&session).into())))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    email: String,
    password: String,
}
