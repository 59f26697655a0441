use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Task;
use crate::error::AppError;
use crate::repository::{TaskRepository, UserRepository};

pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub user_ids: BTreeSet<Uuid>,
}

#[derive(Debug)]
pub struct CreateTaskResponse {
    pub id: Uuid,
}

/// Creates a task after checking every referenced user actually exists.
pub struct CreateTask {
    repository: Arc<dyn TaskRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl CreateTask {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            repository,
            user_repository,
        }
    }

    pub async fn execute(&self, request: CreateTaskRequest) -> Result<CreateTaskResponse, AppError> {
        let known_ids: BTreeSet<Uuid> = self
            .user_repository
            .list()
            .await?
            .iter()
            .map(|user| user.id())
            .collect();

        if !request.user_ids.is_subset(&known_ids) {
            return Err(AppError::RelatedUserNotFound(
                "One or more users do not exist in the system.".to_string(),
            ));
        }

        let task = Task::new(request.title, request.description, request.user_ids)?;

        self.repository.save(&task).await?;
        Ok(CreateTaskResponse { id: task.id() })
    }
}
