use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::password::PasswordHasher;
use crate::domain::{Entity, Notification};
use crate::error::AppError;

lazy_static! {
    // Simple local@domain.tld shape; full RFC validation is not attempted.
    static ref EMAIL_REGEX: regex::Regex = regex::Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap();
}

/// A user account.
///
/// The `password` field holds the *hashed* password for any user that has
/// passed through the create-user flow; plaintext never reaches a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
    #[serde(skip)]
    notification: Notification,
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl User {
    /// Creates a new user with a fresh id and validates it.
    pub fn new(
        username: String,
        email: String,
        password: String,
        is_active: bool,
    ) -> Result<Self, AppError> {
        let mut user = Self {
            id: Uuid::new_v4(),
            username,
            email,
            password,
            is_active,
            notification: Notification::new(),
        };
        user.validate()?;
        Ok(user)
    }

    /// Rebuilds a persisted user without re-running validation.
    ///
    /// Repository hydration path: stored rows were validated when created and
    /// the stored password is a hash, which the creation rules do not apply to.
    pub fn restore(
        id: Uuid,
        username: String,
        email: String,
        password: String,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password,
            is_active,
            notification: Notification::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn activate(&mut self) -> Result<(), AppError> {
        self.is_active = true;
        self.validate()
    }

    pub fn deactivate(&mut self) -> Result<(), AppError> {
        self.is_active = false;
        self.validate()
    }

    /// Checks a plaintext password against the stored hash via the injected hasher.
    pub fn verify_password(
        &self,
        plaintext: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<bool, AppError> {
        hasher.verify(plaintext, &self.password)
    }
}

impl Entity for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&mut self) -> Result<(), AppError> {
        self.notification.clear();

        if self.username.is_empty() {
            self.notification
                .add_error("username_required", "Username is required.");
        }

        if self.email.is_empty() {
            self.notification
                .add_error("email_required", "Email is required.");
        }

        if !EMAIL_REGEX.is_match(&self.email) {
            self.notification
                .add_error("email_invalid", "Email is invalid.");
        }

        if self.password.is_empty() {
            self.notification
                .add_error("password_required", "Password is required.");
        }

        if self.notification.has_errors() {
            return Err(AppError::InvalidUser(self.notification.messages()));
        }
        Ok(())
    }
}
