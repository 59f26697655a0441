use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{Task, TaskStatus, User};
use crate::error::AppError;
use crate::repository::{TaskRepository, UserRepository};

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password: String,
    is_active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> User {
        User::restore(row.id, row.username, row.email, row.password, row.is_active)
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: String,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_ids: Vec<Uuid>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Task {
        Task::restore(
            row.id,
            row.title,
            row.description,
            row.completed,
            row.completed_at,
            row.status,
            row.created_at,
            row.updated_at,
            row.user_ids.into_iter().collect::<BTreeSet<_>>(),
        )
    }
}

const SELECT_USER: &str = "SELECT id, username, email, password, is_active FROM users";

// Assignees are folded into each row so one query hydrates the whole entity.
const SELECT_TASK: &str = "SELECT t.id, t.title, t.description, t.completed, t.completed_at, t.status, \
     t.created_at, t.updated_at, \
     COALESCE(ARRAY_AGG(tu.user_id) FILTER (WHERE tu.user_id IS NOT NULL), '{}') AS user_ids \
     FROM tasks t LEFT JOIN task_users tu ON tu.task_id = t.id";

/// Postgres-backed implementation of [`UserRepository`].
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password, is_active) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE email = $1", SELECT_USER))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE id = $1", SELECT_USER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE username = $1", SELECT_USER))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(SELECT_USER)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

/// Postgres-backed implementation of [`TaskRepository`].
///
/// The task row and its `task_users` association rows are written in one
/// transaction, so a task is never persisted with half its assignees.
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, task: &Task) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO tasks (id, title, description, completed, completed_at, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(task.id())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.completed_at)
        .bind(task.status)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&mut *tx)
        .await?;

        for user_id in &task.users {
            sqlx::query("INSERT INTO task_users (task_id, user_id) VALUES ($1, $2)")
                .bind(task.id())
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "{} WHERE t.id = $1 GROUP BY t.id",
            SELECT_TASK
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Task::from))
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        // task_users rows go with the task via ON DELETE CASCADE.
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE tasks SET title = $1, description = $2, completed = $3, completed_at = $4, \
             status = $5, updated_at = $6 WHERE id = $7",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.completed_at)
        .bind(task.status)
        .bind(task.updated_at)
        .bind(task.id())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM task_users WHERE task_id = $1")
            .bind(task.id())
            .execute(&mut *tx)
            .await?;

        for user_id in &task.users {
            sqlx::query("INSERT INTO task_users (task_id, user_id) VALUES ($1, $2)")
                .bind(task.id())
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<Task>, AppError> {
        let rows = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, TaskRow>(&format!(
                    "{} WHERE t.id IN (SELECT task_id FROM task_users WHERE user_id = $1) \
                     GROUP BY t.id",
                    SELECT_TASK
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TaskRow>(&format!("{} GROUP BY t.id", SELECT_TASK))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows.into_iter().map(Task::from).collect())
    }
}
