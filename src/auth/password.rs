use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashing collaborator injected into the user entity and use-cases.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AppError>;
    fn verify(&self, password: &str, hashed_password: &str) -> Result<bool, AppError>;
}

/// bcrypt-backed [`PasswordHasher`].
pub struct BcryptHasher;

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, 12) // bcrypt default cost is 12
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hashed_password: &str) -> Result<bool, AppError> {
        verify(password, hashed_password)
            .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
    }
}
