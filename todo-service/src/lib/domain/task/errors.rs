use thiserror::Error;

/// Error for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("Title must not be empty")]
    Empty,
}

/// Top-level error for all task-related operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    /// Also returned when the task exists but belongs to another user.
    #[error("Task not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
