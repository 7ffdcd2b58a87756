use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::TaskData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for a partial task update (raw JSON)
///
/// Absent fields are left unchanged. `description: null` clears the
/// description; `null` for the other fields counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Wraps any present value, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, TaskError> {
        Ok(UpdateTaskCommand {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            completed: self.completed,
        })
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    path: Result<Path<(String, i64)>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let Path((_, task_id)) = path?;
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .task_service
        .update_task(&caller.user_id, TaskId(task_id), command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
