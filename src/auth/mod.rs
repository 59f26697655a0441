pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{BcryptHasher, PasswordHasher};
pub use token::{Claims, JwtCodec, TokenCodec, TokenError};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username of the account to authenticate.
    #[validate(length(min = 1))]
    pub username: String,
    /// User's password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 32 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. The full strength rule (at least 8
    /// characters with a letter and a digit) is enforced by the create-user
    /// use-case; this only rejects trivially empty input early.
    #[validate(length(min = 1))]
    pub password: String,
    /// Whether the account starts active. Defaults to true.
    pub is_active: Option<bool>,
}

/// Response structure after successful authentication.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
    /// Token expiry as a Z-suffixed ISO-8601 timestamp, seconds precision.
    pub expires_at: String,
}
