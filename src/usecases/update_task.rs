use std::sync::Arc;

use uuid::Uuid;

use crate::domain::TaskStatus;
use crate::error::AppError;
use crate::repository::TaskRepository;

pub struct UpdateTaskRequest {
    pub task_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Partially updates a task; unspecified fields are left untouched.
///
/// The mutation runs through the entity, so the completed/completed_at
/// consistency rules apply to direct status writes too.
pub struct UpdateTask {
    repository: Arc<dyn TaskRepository>,
}

impl UpdateTask {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: UpdateTaskRequest) -> Result<(), AppError> {
        let Some(mut task) = self.repository.get_by_id(request.task_id).await? else {
            return Err(AppError::TaskNotFound(format!(
                "Task with ID {} not found.",
                request.task_id
            )));
        };

        task.update(request.title, request.description, request.status)?;

        self.repository.update(&task).await
    }
}
