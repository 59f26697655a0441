use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::repository::UserRepository;
use crate::usecases::links;

pub struct GetUserRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct GetUserResponse {
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub links: Value,
}

/// Fetches a single user projection by id.
pub struct GetUser {
    repository: Arc<dyn UserRepository>,
}

impl GetUser {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: GetUserRequest) -> Result<GetUserResponse, AppError> {
        let Some(user) = self.repository.get_by_id(request.id).await? else {
            return Err(AppError::UserNotFound(format!(
                "User with id {} not found.",
                request.id
            )));
        };

        Ok(GetUserResponse {
            username: user.username.clone(),
            email: user.email.clone(),
            is_active: user.is_active,
            links: links::user_detail_links(user.id()),
        })
    }
}
