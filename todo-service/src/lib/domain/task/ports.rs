use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskMutation;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;

/// Port for task domain service operations.
///
/// Every operation takes the verified owner identity; a task owned by anyone
/// else is indistinguishable from a missing one.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// List the owner's tasks in insertion order.
    async fn list_tasks(&self, owner: &UserId) -> Result<Vec<Task>, TaskError>;

    /// Create a task for the owner.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_task(
        &self,
        owner: &UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist or is not owned by `owner`
    async fn get_task(&self, owner: &UserId, id: TaskId) -> Result<Task, TaskError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or is not owned by `owner`
    async fn update_task(
        &self,
        owner: &UserId,
        id: TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// Flip the completion flag.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or is not owned by `owner`
    async fn toggle_task(&self, owner: &UserId, id: TaskId) -> Result<Task, TaskError>;

    /// Hard delete.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or is not owned by `owner`
    async fn delete_task(&self, owner: &UserId, id: TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for tasks, always filtered by owner.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Insert a task and return it with its assigned identifier.
    async fn create(&self, task: NewTask) -> Result<Task, TaskError>;

    /// All tasks of `owner` ordered by id.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskError>;

    /// # Returns
    /// Optional task (None if missing or owned by someone else)
    async fn find_by_id(&self, owner: &UserId, id: TaskId) -> Result<Option<Task>, TaskError>;

    /// Load, mutate and store a task as one atomic step.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or is not owned by `owner`
    /// * `DatabaseError` - Database operation failed
    async fn mutate(
        &self,
        owner: &UserId,
        id: TaskId,
        mutation: TaskMutation,
    ) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist or is not owned by `owner`
    async fn delete(&self, owner: &UserId, id: TaskId) -> Result<(), TaskError>;
}
