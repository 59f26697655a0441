use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Entity, Notification};
use crate::error::AppError;

const MAX_TITLE_CHARS: usize = 30;
const MAX_DESCRIPTION_CHARS: usize = 255;
const MAX_ASSIGNED_USERS: usize = 10;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is yet to be completed.
    Pending,
    /// Task is completed.
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

/// A task with a bounded set of assigned users.
///
/// `completed`, `completed_at` and `status` move together: a completed task
/// carries a completion timestamp and the `completed` status, a pending task
/// carries neither. Every mutation bumps `updated_at` and re-validates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    id: Uuid,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub users: BTreeSet<Uuid>,
    #[serde(skip)]
    notification: Notification,
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Task {
    /// Creates a new pending task with a fresh id and validates it.
    pub fn new(
        title: String,
        description: String,
        users: BTreeSet<Uuid>,
    ) -> Result<Self, AppError> {
        let now = Utc::now();
        let mut task = Self {
            id: Uuid::new_v4(),
            title,
            description,
            completed: false,
            completed_at: None,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
            users,
            notification: Notification::new(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Rebuilds a persisted task without re-running validation.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        title: String,
        description: String,
        completed: bool,
        completed_at: Option<DateTime<Utc>>,
        status: TaskStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        users: BTreeSet<Uuid>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            completed_at,
            status,
            created_at,
            updated_at,
            users,
            notification: Notification::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Marks the task completed, stamping the completion time.
    ///
    /// The only modeled status transition: `pending` -> `completed`.
    pub fn complete(&mut self) -> Result<(), AppError> {
        let now = Utc::now();
        self.completed = true;
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;
        self.validate()
    }

    pub fn add_user(&mut self, user_id: Uuid) -> Result<(), AppError> {
        if self.users.contains(&user_id) {
            return Err(AppError::InvalidTaskData(
                "User is already assigned to this task.".to_string(),
            ));
        }
        self.users.insert(user_id);
        self.updated_at = Utc::now();
        self.validate()
    }

    pub fn remove_user(&mut self, user_id: Uuid) -> Result<(), AppError> {
        if !self.users.contains(&user_id) {
            return Err(AppError::InvalidTaskData(
                "User is not assigned to this task.".to_string(),
            ));
        }
        self.users.remove(&user_id);
        self.updated_at = Utc::now();
        self.validate()
    }

    /// Partially updates the task; unspecified fields are left untouched.
    pub fn update(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        status: Option<TaskStatus>,
    ) -> Result<(), AppError> {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(status) = status {
            self.status = status;
        }
        self.updated_at = Utc::now();
        self.validate()
    }
}

impl Entity for Task {
    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&mut self) -> Result<(), AppError> {
        self.notification.clear();

        if self.title.is_empty() {
            self.notification
                .add_error("title_required", "Title cannot be empty.");
        }
        if self.description.is_empty() {
            self.notification
                .add_error("description_required", "Description cannot be empty.");
        }
        if self.completed_at.is_some() && !self.completed {
            self.notification.add_error(
                "completed_at_without_completed",
                "Task cannot be completed without setting completed at date.",
            );
        }
        if self.completed && self.completed_at.is_none() {
            self.notification.add_error(
                "completed_without_completed_at",
                "Completed tasks must have a completed at date set.",
            );
        }
        if self.completed_at.is_some() && self.status != TaskStatus::Completed {
            self.notification.add_error(
                "status_not_completed",
                "Completed tasks must have a status of 'completed'.",
            );
        }
        if self.status == TaskStatus::Completed && self.completed_at.is_none() {
            self.notification.add_error(
                "completed_status_without_completed_at",
                "Completed tasks must have a completed at date set.",
            );
        }
        if self.users.len() > MAX_ASSIGNED_USERS {
            self.notification.add_error(
                "too_many_users",
                "A task cannot have more than 10 users assigned.",
            );
        }
        if self.title.chars().count() > MAX_TITLE_CHARS {
            self.notification
                .add_error("title_too_long", "Title cannot exceed 30 characters.");
        }
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            self.notification.add_error(
                "description_too_long",
                "Description cannot exceed 255 characters.",
            );
        }

        if self.notification.has_errors() {
            return Err(AppError::InvalidTaskData(self.notification.messages()));
        }
        Ok(())
    }
}
