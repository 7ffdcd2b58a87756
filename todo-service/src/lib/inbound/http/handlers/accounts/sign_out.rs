use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::removal_cookie;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Clears the session cookie. The token itself stays valid until it expires.
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<SignOutResponseData>) {
    (
        jar.add(removal_cookie(&state.cookie_name)),
        ApiSuccess::new(
            StatusCode::OK,
            SignOutResponseData {
                message: "Successfully signed out".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignOutResponseData {
    pub message: String,
}
