use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::task::errors::TaskTitleError;
use crate::domain::user::models::timestamp_now;
use crate::domain::user::models::UserId;

/// Task unique identifier, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task title value type
///
/// Must contain at least one non-whitespace character. The value is stored
/// as given, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    pub fn new(title: String) -> Result<Self, TaskTitleError> {
        if title.trim().is_empty() {
            return Err(TaskTitleError::Empty);
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task entity, always scoped to exactly one owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: TaskTitle,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Apply a mutation and refresh `updated_at`.
    pub fn apply(&mut self, mutation: TaskMutation) {
        self.apply_at(mutation, timestamp_now());
    }

    /// Apply a mutation as of `now`.
    ///
    /// `updated_at` strictly increases: when `now` is not later than the
    /// current value it advances by one microsecond instead.
    pub fn apply_at(&mut self, mutation: TaskMutation, now: DateTime<Utc>) {
        match mutation {
            TaskMutation::Update(command) => {
                if let Some(title) = command.title {
                    self.title = title;
                }
                if let Some(description) = command.description {
                    self.description = description;
                }
                if let Some(completed) = command.completed {
                    self.completed = completed;
                }
            }
            TaskMutation::ToggleCompleted => {
                self.completed = !self.completed;
            }
        }

        self.updated_at = now.max(self.updated_at + Duration::microseconds(1));
    }
}

/// A task to be inserted; storage assigns the identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub user_id: UserId,
    pub title: TaskTitle,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new(owner: UserId, command: CreateTaskCommand) -> Self {
        let now = timestamp_now();
        Self {
            user_id: owner,
            title: command.title,
            description: command.description,
            completed: command.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the storage-assigned identifier.
    pub fn with_id(self, id: TaskId) -> Task {
        Task {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Command to create a task with domain types
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: Option<String>,
    pub completed: bool,
}

/// Partial update; `None` leaves a field unchanged.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

/// Read-modify-write operations applied under a row lock.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskMutation {
    Update(UpdateTaskCommand),
    ToggleCompleted,
}
