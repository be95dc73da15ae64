//! Presentation shapes for users and tasks.

use crate::task::domain::Task;
use crate::user::domain::User;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Presentation shape of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    /// Returns the location of this user's resource.
    #[must_use]
    pub fn location(&self) -> String {
        format!("/api/users/{}", self.id)
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().into_inner(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

/// Owner summary embedded in [`TaskResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
        }
    }
}

/// Presentation shape of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Owning user identifier.
    pub user_id: Uuid,
    /// Owner summary, when the owner was loaded.
    pub user: Option<UserInfo>,
    /// Completion flag.
    pub is_completed: bool,
}

impl TaskResponse {
    /// Returns the location of this task's resource.
    #[must_use]
    pub fn location(&self) -> String {
        format!("/api/tasks/{}", self.id)
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            created_at: task.created_at(),
            due_date: task.due_date(),
            user_id: task.user_id().into_inner(),
            user: task.owner().map(UserInfo::from),
            is_completed: task.is_completed(),
        }
    }
}
