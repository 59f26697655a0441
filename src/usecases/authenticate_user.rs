use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::auth::password::PasswordHasher;
use crate::auth::token::{Claims, TokenCodec};
use crate::error::AppError;
use crate::repository::UserRepository;

pub struct AuthenticateUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct AuthenticateUserResponse {
    pub token: String,
    /// Token expiry as a Z-suffixed ISO-8601 timestamp, seconds precision.
    pub expires_at: String,
}

/// Verifies credentials and issues a signed, expiring token.
///
/// An unknown username and a wrong password produce the same generic error,
/// so a caller cannot probe which check failed.
pub struct AuthenticateUser {
    repository: Arc<dyn UserRepository>,
    token_codec: Arc<dyn TokenCodec>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_exp_minutes: i64,
}

impl AuthenticateUser {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        token_codec: Arc<dyn TokenCodec>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_exp_minutes: i64,
    ) -> Self {
        Self {
            repository,
            token_codec,
            password_hasher,
            token_exp_minutes,
        }
    }

    pub async fn execute(
        &self,
        request: AuthenticateUserRequest,
    ) -> Result<AuthenticateUserResponse, AppError> {
        let Some(user) = self.repository.get_by_username(&request.username).await? else {
            return Err(AppError::InvalidUser(
                "Invalid username or password".to_string(),
            ));
        };
        if !user.verify_password(&request.password, self.password_hasher.as_ref())? {
            return Err(AppError::InvalidUser(
                "Invalid username or password".to_string(),
            ));
        }

        let expires_at = Utc::now() + Duration::minutes(self.token_exp_minutes);
        let token = self.token_codec.encode(Claims {
            sub: user.id(),
            exp: expires_at.timestamp() as usize,
        })?;

        Ok(AuthenticateUserResponse {
            token,
            expires_at: expires_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        })
    }
}
