use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::repository::UserRepository;
use crate::usecases::links;

const ORDERABLE_FIELDS: [&str; 3] = ["username", "email", "id"];

pub struct ListUsersRequest {
    pub order_by: String,
    pub current_page: usize,
    pub page_size: usize,
}

impl Default for ListUsersRequest {
    fn default() -> Self {
        Self {
            order_by: "username".to_string(),
            current_page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserOutput {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub links: Value,
}

#[derive(Debug, Serialize)]
pub struct MetaOutput {
    pub total_users: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub query_params: Value,
}

#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub data: Vec<UserOutput>,
    pub meta: MetaOutput,
    pub links: Value,
}

/// Lists users sorted ascending by a whitelisted field, one page at a time.
pub struct ListUsers {
    repository: Arc<dyn UserRepository>,
}

impl ListUsers {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: ListUsersRequest) -> Result<ListUsersResponse, AppError> {
        let mut users = self.repository.list().await?;

        if !ORDERABLE_FIELDS.contains(&request.order_by.as_str()) {
            return Err(AppError::InvalidOrderBy(format!(
                "Invalid order_by field: {}",
                request.order_by
            )));
        }

        users.sort_by(|a, b| match request.order_by.as_str() {
            "username" => a.username.cmp(&b.username),
            "email" => a.email.cmp(&b.email),
            _ => a.id().cmp(&b.id()),
        });

        let total_users = users.len();
        let page = request.current_page.max(1);
        let page_offset = (page - 1) * request.page_size;

        let data = users
            .into_iter()
            .skip(page_offset)
            .take(request.page_size)
            .map(|user| {
                let id = user.id();
                UserOutput {
                    id,
                    username: user.username,
                    email: user.email,
                    links: links::user_item_links(id),
                }
            })
            .collect();

        Ok(ListUsersResponse {
            data,
            meta: MetaOutput {
                total_users,
                current_page: page,
                page_size: request.page_size,
                query_params: json!({
                    "order_by": request.order_by,
                    "page": page,
                    "size": request.page_size
                }),
            },
            links: links::users_page_links(page, request.page_size, &request.order_by, total_users),
        })
    }
}
