use std::collections::BTreeSet;

use crate::{
    auth::AuthenticatedUserId,
    domain::TaskStatus,
    error::AppError,
    state::AppState,
    usecases::{
        create_task::{CreateTask, CreateTaskRequest},
        delete_task::{DeleteTask, DeleteTaskRequest},
        get_task::{GetTask, GetTaskRequest},
        list_tasks::{ListTasks, ListTasksRequest},
        update_task::{UpdateTask, UpdateTaskRequest},
    },
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 1 and 30 characters.
    #[validate(length(min = 1, max = 30))]
    pub title: String,

    /// The description of the task. Must be between 1 and 255 characters.
    #[validate(length(min = 1, max = 255))]
    pub description: String,

    /// Users to assign. The caller is always added to this set.
    pub users: Option<Vec<Uuid>>,
}

/// Input structure for (partially) updating a task.
#[derive(Debug, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub order_by: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

/// Lists the tasks the authenticated user is assigned to.
///
/// ## Query Parameters:
/// - `order_by` (optional): one of `title`, `status`, `created_at`, `updated_at`.
///   Defaults to `title`.
/// - `page` (optional): 1-based page index. Defaults to 1.
/// - `size` (optional): page size. Defaults to 10.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    query: web::Query<TaskListQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();
    let defaults = ListTasksRequest::default();

    let use_case = ListTasks::new(state.task_repository.clone());
    let response = use_case
        .execute(ListTasksRequest {
            order_by: query.order_by.unwrap_or(defaults.order_by),
            page: query.page.unwrap_or(defaults.page),
            size: query.size.unwrap_or(defaults.size),
            user_id: Some(user.0),
        })
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Creates a new task. The authenticated caller is always assigned to it,
/// alongside any users named in the payload.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    // Validate input
    task_data.validate()?;
    let task_data = task_data.into_inner();

    let mut user_ids: BTreeSet<Uuid> = task_data.users.unwrap_or_default().into_iter().collect();
    user_ids.insert(user.0);

    let use_case = CreateTask::new(
        state.task_repository.clone(),
        state.user_repository.clone(),
    );
    let response = use_case
        .execute(CreateTaskRequest {
            title: task_data.title,
            description: task_data.description,
            user_ids,
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": response.id
    })))
}

/// Retrieves a specific task by its ID.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    _user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let use_case = GetTask::new(state.task_repository.clone());
    let response = use_case
        .execute(GetTaskRequest {
            task_id: task_id.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

async fn apply_update(
    state: &AppState,
    task_id: Uuid,
    patch: TaskPatch,
) -> Result<HttpResponse, AppError> {
    let use_case = UpdateTask::new(state.task_repository.clone());
    use_case
        .execute(UpdateTaskRequest {
            task_id,
            title: patch.title,
            description: patch.description,
            status: patch.status,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Updates an existing task. Fields omitted from the payload keep their value.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskPatch>,
    _user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    apply_update(&state, task_id.into_inner(), task_data.into_inner()).await
}

/// Partially updates an existing task.
#[patch("/{id}")]
pub async fn patch_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskPatch>,
    _user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    apply_update(&state, task_id.into_inner(), task_data.into_inner()).await
}

/// Deletes a task by its ID.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<Uuid>,
    _user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let use_case = DeleteTask::new(state.task_repository.clone());
    use_case
        .execute(DeleteTaskRequest {
            id: task_id.into_inner(),
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
