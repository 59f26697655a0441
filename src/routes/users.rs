use crate::{
    auth::RegisterRequest,
    error::AppError,
    state::AppState,
    usecases::{
        create_user::{CreateUser, CreateUserRequest},
        get_user::{GetUser, GetUserRequest},
        list_users::{ListUsers, ListUsersRequest},
    },
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account and returns its id. This is the only
/// unauthenticated `/api/users` operation.
#[post("")]
pub async fn create_user(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;
    let register_data = register_data.into_inner();

    let use_case = CreateUser::new(
        state.user_repository.clone(),
        state.password_hasher.clone(),
    );

    let response = use_case
        .execute(CreateUserRequest {
            username: register_data.username,
            email: register_data.email,
            password: register_data.password,
            is_active: register_data.is_active.unwrap_or(true),
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "id": response.id
    })))
}

/// Retrieves a user's public projection by id.
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let use_case = GetUser::new(state.user_repository.clone());
    let response = use_case
        .execute(GetUserRequest {
            id: user_id.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub order_by: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

/// Lists users sorted and paginated.
///
/// ## Query Parameters:
/// - `order_by` (optional): one of `username`, `email`, `id`. Defaults to `username`.
/// - `page` (optional): 1-based page index. Defaults to 1.
/// - `size` (optional): page size. Defaults to 10.
#[get("")]
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<ListUsersQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();
    let defaults = ListUsersRequest::default();

    let use_case = ListUsers::new(state.user_repository.clone());
    let response = use_case
        .execute(ListUsersRequest {
            order_by: query.order_by.unwrap_or(defaults.order_by),
            current_page: query.page.unwrap_or(defaults.current_page),
            page_size: query.size.unwrap_or(defaults.page_size),
        })
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
