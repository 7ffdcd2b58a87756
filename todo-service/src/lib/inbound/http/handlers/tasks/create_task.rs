use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::TaskTitle;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TaskData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let Json(body) = body?;

    state
        .task_service
        .create_task(&caller.user_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, TaskError> {
        Ok(CreateTaskCommand {
            title: TaskTitle::new(self.title)?,
            description: self.description,
            completed: self.completed.unwrap_or(false),
        })
    }
}
