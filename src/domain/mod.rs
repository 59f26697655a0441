pub mod entity;
pub mod notification;
pub mod task;
pub mod user;

pub use entity::Entity;
pub use notification::Notification;
pub use task::{Task, TaskStatus};
pub use user::User;
