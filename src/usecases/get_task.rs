use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::repository::TaskRepository;
use crate::usecases::links;

pub struct GetTaskRequest {
    pub task_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct TaskOutput {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub users: BTreeSet<Uuid>,
    pub links: Value,
}

#[derive(Debug, Serialize)]
pub struct GetTaskResponse {
    pub data: TaskOutput,
    pub links: Value,
}

/// Fetches one task with timestamps rendered as ISO-8601 strings.
pub struct GetTask {
    repository: Arc<dyn TaskRepository>,
}

impl GetTask {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: GetTaskRequest) -> Result<GetTaskResponse, AppError> {
        let Some(task) = self.repository.get_by_id(request.task_id).await? else {
            return Err(AppError::TaskNotFound(format!(
                "Task with ID {} not found.",
                request.task_id
            )));
        };

        Ok(GetTaskResponse {
            data: TaskOutput {
                id: task.id(),
                title: task.title.clone(),
                description: task.description.clone(),
                status: task.status.as_str().to_string(),
                created_at: task.created_at.to_rfc3339(),
                updated_at: task.updated_at.to_rfc3339(),
                users: task.users.clone(),
                links: links::task_item_links(task.id()),
            },
            links: links::task_detail_links(task.id()),
        })
    }
}
