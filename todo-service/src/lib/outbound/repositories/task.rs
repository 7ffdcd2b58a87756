use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::NewTask;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskMutation;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_task(row: &PgRow) -> Result<Task, TaskError> {
        let title: String = row.try_get("title").map_err(database_error)?;

        Ok(Task {
            id: TaskId(row.try_get("id").map_err(database_error)?),
            user_id: UserId::from(row.try_get::<String, _>("user_id").map_err(database_error)?),
            title: TaskTitle::new(title)?,
            description: row.try_get("description").map_err(database_error)?,
            completed: row.try_get("completed").map_err(database_error)?,
            created_at: row.try_get("created_at").map_err(database_error)?,
            updated_at: row.try_get("updated_at").map_err(database_error)?,
        })
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, TaskError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (user_id, title, description, completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(task.user_id.as_str())
        .bind(task.title.as_str())
        .bind(task.description.as_deref())
        .bind(task.completed)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(task.with_id(TaskId(id)))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(Self::row_to_task).collect()
    }

    async fn find_by_id(&self, owner: &UserId, id: TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(Self::row_to_task).transpose()
    }

    async fn mutate(
        &self,
        owner: &UserId,
        id: TaskId,
        mutation: TaskMutation,
    ) -> Result<Task, TaskError> {
        // Rolled back on drop if any step below returns early.
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, description, completed, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            FOR UPDATE
            "#,
        )
        .bind(id.0)
        .bind(owner.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(database_error)?;

        let mut task = match row {
            Some(r) => Self::row_to_task(&r)?,
            None => return Err(TaskError::NotFound(id.0)),
        };

        task.apply(mutation);

        sqlx::query(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, completed = $5, updated_at = $6
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(task.id.0)
        .bind(task.user_id.as_str())
        .bind(task.title.as_str())
        .bind(task.description.as_deref())
        .bind(task.completed)
        .bind(task.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(task)
    }

    async fn delete(&self, owner: &UserId, id: TaskId) -> Result<(), TaskError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.0)
        .bind(owner.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id.0));
        }

        Ok(())
    }
}
