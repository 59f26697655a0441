use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppError;
use crate::repository::TaskRepository;

pub struct DeleteTaskRequest {
    pub id: Uuid,
}

pub struct DeleteTask {
    repository: Arc<dyn TaskRepository>,
}

impl DeleteTask {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: DeleteTaskRequest) -> Result<(), AppError> {
        if self.repository.get_by_id(request.id).await?.is_none() {
            return Err(AppError::TaskNotFound(format!(
                "Task with ID {} not found.",
                request.id
            )));
        }

        self.repository.delete(request.id).await
    }
}
