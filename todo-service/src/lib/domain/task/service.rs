use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskMutation;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn list_tasks(&self, owner: &UserId) -> Result<Vec<Task>, TaskError> {
        self.repository.list_by_owner(owner).await
    }

    async fn create_task(
        &self,
        owner: &UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        let task = self
            .repository
            .create(NewTask::new(owner.clone(), command))
            .await?;

        tracing::debug!(user_id = %owner, task_id = %task.id, "Task created");

        Ok(task)
    }

    async fn get_task(&self, owner: &UserId, id: TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(TaskError::NotFound(id.0))
    }

    async fn update_task(
        &self,
        owner: &UserId,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        self.repository
            .mutate(owner, id, TaskMutation::Update(command))
            .await
    }

    async fn toggle_task(&self, owner: &UserId, id: TaskId) -> Result<Task, TaskError> {
        self.repository
            .mutate(owner, id, TaskMutation::ToggleCompleted)
            .await
    }

    async fn delete_task(&self, owner: &UserId, id: TaskId) -> Result<(), TaskError> {
        self.repository.delete(owner, id).await?;

        tracing::debug!(user_id = %owner, task_id = %id, "Task deleted");

        Ok(())
    }
}
