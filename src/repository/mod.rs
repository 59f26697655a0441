//! Persistence contracts consumed by the use-case layer.
//!
//! Use-cases depend only on these traits; the concrete backend (Postgres for
//! the running server, in-memory for tests) is chosen at wiring time.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Task, User};
use crate::error::AppError;

pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use postgres::{PostgresTaskRepository, PostgresUserRepository};

/// Persistence operations for [`User`] entities.
///
/// Lookups return `Ok(None)` for missing rows; `Err` is reserved for
/// infrastructure failures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> Result<(), AppError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;
}

/// Persistence operations for [`Task`] entities.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn save(&self, task: &Task) -> Result<(), AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    /// Deletes the task with the given id. Deleting a missing id is a no-op;
    /// existence checks belong to the caller.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    async fn update(&self, task: &Task) -> Result<(), AppError>;

    /// Lists tasks, restricted to those `user_id` is assigned to when given.
    /// This filter is the ownership-scoping mechanism for task listings.
    async fn list(&self, user_id: Option<Uuid>) -> Result<Vec<Task>, AppError>;
}
