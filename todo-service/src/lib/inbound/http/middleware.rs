use std::collections::HashMap;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified caller identity in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the session token and records the caller.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = state.credentials.extract(req.headers()).map_err(|e| {
        tracing::warn!(uri = %req.uri(), "Missing credentials");
        ApiError::from(e)
    })?;

    let subject = state.guard.authenticate(&token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::from(subject),
    });

    Ok(next.run(req).await)
}

/// Middleware for `/api/:user_id/...` routes.
///
/// Credentials are checked before ownership: a bad or missing token is 401
/// even when the path names someone else, a valid token for another user is 403.
pub async fn authorize_owner(
    State(state): State<AppState>,
    path: Result<Path<HashMap<String, String>>, PathRejection>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = state.credentials.extract(req.headers()).map_err(|e| {
        tracing::warn!(uri = %req.uri(), "Missing credentials");
        ApiError::from(e)
    })?;

    let Path(params) = path?;
    let path_user_id = params.get("user_id").ok_or_else(|| {
        ApiError::InternalServerError("Route is missing the user_id parameter".to_string())
    })?;

    let subject = state.guard.authorize(&token, path_user_id).map_err(|e| {
        if e.is_forbidden() {
            tracing::warn!(requested = %path_user_id, "Cross-user access denied");
        } else {
            tracing::warn!(error = %e, "Token validation failed");
        }
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::from(subject),
    });

    Ok(next.run(req).await)
}
