use std::sync::Arc;

use uuid::Uuid;

use crate::auth::password::PasswordHasher;
use crate::domain::User;
use crate::error::AppError;
use crate::repository::UserRepository;

pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Debug)]
pub struct CreateUserResponse {
    pub id: Uuid,
}

/// Registers a new user: enforces email uniqueness and the plaintext
/// password strength rule, hashes the password, then persists the entity.
pub struct CreateUser {
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

// The strength rule applies to the plaintext only; the stored hash is exempt.
fn password_is_strong(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

impl CreateUser {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    pub async fn execute(&self, request: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        if self.repository.get_by_email(&request.email).await?.is_some() {
            return Err(AppError::UserAlreadyExists(format!(
                "User with email {} already exists.",
                request.email
            )));
        }

        if !password_is_strong(&request.password) {
            return Err(AppError::InvalidUser(
                "Password must be at least 8 characters long and contain both letters and numbers."
                    .to_string(),
            ));
        }

        let hashed_password = self.password_hasher.hash(&request.password)?;
        let user = User::new(
            request.username,
            request.email,
            hashed_password,
            request.is_active,
        )?;

        self.repository.save(&user).await?;
        Ok(CreateUserResponse { id: user.id() })
    }
}
