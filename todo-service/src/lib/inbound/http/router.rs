use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGuard;
use axum::body::Body;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::credentials::CredentialExtractor;
use super::handlers::accounts::me;
use super::handlers::accounts::sign_in;
use super::handlers::accounts::sign_out;
use super::handlers::accounts::sign_up;
use super::handlers::system::health;
use super::handlers::system::root;
use super::handlers::tasks::create_task;
use super::handlers::tasks::delete_task;
use super::handlers::tasks::get_task;
use super::handlers::tasks::list_tasks;
use super::handlers::tasks::toggle_complete;
use super::handlers::tasks::update_task;
use super::middleware::authenticate as auth_middleware;
use super::middleware::authorize_owner;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub task_service: Arc<dyn TaskServicePort>,
    pub guard: Arc<AuthorizationGuard>,
    pub credentials: Arc<CredentialExtractor>,
    pub cookie_name: Arc<str>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServicePort>,
        task_service: Arc<dyn TaskServicePort>,
        guard: Arc<AuthorizationGuard>,
        cookie_name: &str,
    ) -> Self {
        Self {
            user_service,
            task_service,
            guard,
            credentials: Arc::new(CredentialExtractor::header_then_cookie(cookie_name)),
            cookie_name: Arc::from(cookie_name),
        }
    }
}

pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/signup", post(sign_up))
        .route("/api/auth/signin", post(sign_in))
        .route("/api/auth/signout", post(sign_out));

    let session_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let task_routes = Router::new()
        .route("/api/:user_id/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/:user_id/tasks/:task_id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/:user_id/tasks/:task_id/complete", patch(toggle_complete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authorize_owner,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(task_routes)
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter(|origin| {
            // A wildcard cannot be combined with credentials
            let wildcard = origin.trim() == "*";
            if wildcard {
                tracing::warn!("Ignoring wildcard CORS origin");
            }
            !wildcard
        })
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skips_wildcard_and_invalid_origins() {
        // Builds without panicking; tower-http rejects "*" in a list
        let _ = cors_layer(&[
            "*".to_string(),
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ]);
    }
}
