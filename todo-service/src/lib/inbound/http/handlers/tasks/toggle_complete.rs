use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::task::models::TaskId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TaskData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn toggle_complete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let Path((_, task_id)) = path?;

    state
        .task_service
        .toggle_task(&caller.user_id, TaskId(task_id))
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
