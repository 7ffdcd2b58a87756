use auth::SESSION_TTL_DAYS;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use serde::Serialize;

use super::UserData;
use crate::domain::user::models::Session;

pub mod me;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use me::me;
pub use sign_in::sign_in;
pub use sign_out::sign_out;
pub use sign_up::sign_up;

/// Body returned by sign-up and sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub token: String,
    pub user: UserData,
}

impl From<&Session> for SessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            user: (&session.user).into(),
        }
    }
}

/// Session cookie carrying `token`, valid as long as the token itself.
pub fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Cookie that makes the client drop the session cookie.
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new());
    cookie.make_removal();
    cookie
}
