use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::repository::TaskRepository;
use crate::usecases::links;

const ORDERABLE_FIELDS: [&str; 4] = ["title", "status", "created_at", "updated_at"];

pub struct ListTasksRequest {
    pub order_by: String,
    pub page: usize,
    pub size: usize,
    /// Tasks are always listed on behalf of a user; the repository filter
    /// restricts the result to tasks this user is assigned to.
    pub user_id: Option<Uuid>,
}

impl Default for ListTasksRequest {
    fn default() -> Self {
        Self {
            order_by: "title".to_string(),
            page: 1,
            size: 10,
            user_id: None,
        }
    }
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
pub struct MetaOutput {
    pub total_tasks: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub query_params: Value,
}

#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    pub data: Vec<TaskOutput>,
    pub meta: MetaOutput,
    pub links: Value,
}

/// Lists the tasks visible to one user, sorted and paginated.
pub struct ListTasks {
    repository: Arc<dyn TaskRepository>,
}

impl ListTasks {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: ListTasksRequest) -> Result<ListTasksResponse, AppError> {
        let Some(user_id) = request.user_id else {
            return Err(AppError::BadRequest(
                "User ID must be provided in the request.".to_string(),
            ));
        };

        let mut tasks = self.repository.list(Some(user_id)).await?;

        if !ORDERABLE_FIELDS.contains(&request.order_by.as_str()) {
            return Err(AppError::InvalidTaskBy(format!(
                "Invalid order_by field: {}",
                request.order_by
            )));
        }

        tasks.sort_by(|a, b| match request.order_by.as_str() {
            "title" => a.title.cmp(&b.title),
            // Status sorts by its lowercase string form: completed < pending.
            "status" => a.status.as_str().cmp(b.status.as_str()),
            "created_at" => a.created_at.cmp(&b.created_at),
            _ => a.updated_at.cmp(&b.updated_at),
        });

        let total_tasks = tasks.len();
        let page = request.page.max(1);
        let page_offset = (page - 1) * request.size;

        let data = tasks
            .into_iter()
            .skip(page_offset)
            .take(request.size)
            .map(|task| TaskOutput {
                id: task.id(),
                title: task.title.clone(),
                description: task.description.clone(),
                status: task.status.as_str().to_string(),
                created_at: task.created_at.to_rfc3339(),
                updated_at: task.updated_at.to_rfc3339(),
                users: task.users.clone(),
                links: links::task_item_links(task.id()),
            })
            .collect();

        Ok(ListTasksResponse {
            data,
            meta: MetaOutput {
                total_tasks,
                current_page: page,
                page_size: request.size,
                query_params: json!({
                    "order_by": request.order_by,
                    "page": page,
                    "size": request.size
                }),
            },
            links: links::tasks_page_links(page, request.size, &request.order_by, total_tasks),
        })
    }
}
