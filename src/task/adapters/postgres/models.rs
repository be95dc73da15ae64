//! Diesel row models for task persistence.

use crate::persistence::postgres::schema::tasks;
use crate::task::domain::{PersistedTaskData, Task, TaskId};
use crate::user::adapters::postgres::UserRow;
use crate::user::domain::{User, UserId};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Completion flag.
    pub is_completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Completion flag.
    pub is_completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for mutable task columns.
///
/// `None` clears nullable columns instead of leaving them untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks, treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Completion flag.
    pub is_completed: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Converts a task row and its optionally joined owner row into a task.
#[must_use]
pub fn row_to_task(row: TaskRow, owner: Option<UserRow>) -> Task {
    let TaskRow {
        id,
        title,
        description,
        due_date,
        user_id,
        is_completed,
        created_at,
        updated_at,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        due_date,
        user_id: UserId::from_uuid(user_id),
        is_completed,
        created_at,
        updated_at,
    })
    .with_owner(owner.map(User::from))
}

impl From<&Task> for NewTaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            due_date: task.due_date(),
            user_id: task.user_id().into_inner(),
            is_completed: task.is_completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            due_date: task.due_date(),
            user_id: task.user_id().into_inner(),
            is_completed: task.is_completed(),
            updated_at: task.updated_at(),
        }
    }
}
