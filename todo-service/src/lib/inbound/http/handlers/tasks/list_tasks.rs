use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TaskData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    state
        .task_service
        .list_tasks(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|tasks| ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect()))
}
