//! Application operations, one module per use-case.
//!
//! Each use-case validates its input, talks to the repositories, applies the
//! business rules, and shapes a response; the HTTP layer only translates.

pub mod authenticate_user;
pub mod create_task;
pub mod create_user;
pub mod delete_task;
pub mod get_task;
pub mod get_user;
pub mod links;
pub mod list_tasks;
pub mod list_users;
pub mod update_task;

pub use authenticate_user::AuthenticateUser;
pub use create_task::CreateTask;
pub use create_user::CreateUser;
pub use delete_task::DeleteTask;
pub use get_task::GetTask;
pub use get_user::GetUser;
pub use list_tasks::ListTasks;
pub use list_users::ListUsers;
pub use update_task::UpdateTask;
