use std::sync::Arc;

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenCodec;
use crate::repository::{TaskRepository, UserRepository};

/// Shared application state handed to every handler.
///
/// Handlers construct use-cases from these collaborators per request; the
/// concrete implementations (Postgres vs in-memory, bcrypt, JWT) are chosen
/// once at wiring time.
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserRepository>,
    pub task_repository: Arc<dyn TaskRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_codec: Arc<dyn TokenCodec>,
    pub token_exp_minutes: i64,
}
