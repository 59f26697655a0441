//!
//! # Application Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! The variants mirror the failure modes of the domain and use-case layers (validation
//! failures, uniqueness and referential-integrity violations, missing resources,
//! unsupported sort fields) plus the boundary/infrastructure conditions the HTTP layer
//! and the persistence backend can produce.
//!
//! `AppError` implements `actix_web::error::ResponseError` so use-case errors convert
//! into HTTP responses with JSON bodies without per-handler mapping code. Each failure
//! kind is a distinct variant: callers branch on the variant, never on message text.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A user failed input or entity-level validation (HTTP 422).
    InvalidUser(String),
    /// A task failed input or entity-level validation (HTTP 422).
    InvalidTaskData(String),
    /// A user with the same email already exists (HTTP 409).
    UserAlreadyExists(String),
    /// The requested user does not exist (HTTP 404).
    UserNotFound(String),
    /// The requested task does not exist (HTTP 404).
    TaskNotFound(String),
    /// A task references one or more unknown users (HTTP 400).
    RelatedUserNotFound(String),
    /// An unsupported sort field was requested when listing users (HTTP 400).
    InvalidOrderBy(String),
    /// An unsupported sort field was requested when listing tasks (HTTP 400).
    InvalidTaskBy(String),
    /// A malformed or incomplete request (HTTP 400).
    BadRequest(String),
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidUser(msg) => write!(f, "Invalid user: {}", msg),
            AppError::InvalidTaskData(msg) => write!(f, "Invalid task data: {}", msg),
            AppError::UserAlreadyExists(msg) => write!(f, "User already exists: {}", msg),
            AppError::UserNotFound(msg) => write!(f, "User not found: {}", msg),
            AppError::TaskNotFound(msg) => write!(f, "Task not found: {}", msg),
            AppError::RelatedUserNotFound(msg) => write!(f, "Related user not found: {}", msg),
            AppError::InvalidOrderBy(msg) => write!(f, "Invalid order_by: {}", msg),
            AppError::InvalidTaskBy(msg) => write!(f, "Invalid order_by: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON error responses.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::InvalidUser(msg) | AppError::InvalidTaskData(msg) => {
                HttpResponse::UnprocessableEntity().json(json!({
                    "error": msg
                }))
            }
            AppError::UserAlreadyExists(msg) => HttpResponse::Conflict().json(json!({
                "error": msg
            })),
            AppError::UserNotFound(msg) | AppError::TaskNotFound(msg) => {
                HttpResponse::NotFound().json(json!({
                    "error": msg
                }))
            }
            AppError::RelatedUserNotFound(msg)
            | AppError::InvalidOrderBy(msg)
            | AppError::InvalidTaskBy(msg)
            | AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            // Database errors are presented as generic internal server errors to the client.
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                HttpResponse::InternalServerError().json(json!({
                    "error": msg
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError::DatabaseError`.
///
/// Repositories use `fetch_optional` for lookups, so `RowNotFound` never carries
/// resource-missing semantics here; every sqlx failure is an infrastructure error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::BadRequest`.
///
/// These come from the HTTP payload structs; entity-level validation reports
/// through `InvalidUser`/`InvalidTaskData` instead.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}
