//! Task entity and its construction parameters.

use super::{TaskId, validator};
use crate::persistence::Entity;
use crate::user::domain::{User, UserId};
use crate::validation::FieldFailure;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Caller-supplied fields of a new or replacement task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    user_id: UserId,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, user_id: UserId) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
            user_id,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// A unit of work owned by a user.
///
/// Equality ignores the attached owner: two tasks are equal when their own
/// fields match.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    due_date: Option<DateTime<Utc>>,
    user_id: UserId,
    owner: Option<User>,
    is_completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted owner identifier.
    pub user_id: UserId,
    /// Persisted completion flag.
    pub is_completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

fn normalise_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

impl Task {
    /// Creates a new pending task from a draft.
    ///
    /// Performs no validation and no I/O.
    #[must_use]
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: draft.title.trim().to_owned(),
            description: normalise_description(draft.description.as_deref()),
            due_date: draft.due_date,
            user_id: draft.user_id,
            owner: None,
            is_completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Builds a replacement carrying this task's identity, creation time and
    /// completion flag, with the draft's fields.
    #[must_use]
    pub fn replace(&self, draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            id: self.id,
            title: draft.title.trim().to_owned(),
            description: normalise_description(draft.description.as_deref()),
            due_date: draft.due_date,
            user_id: draft.user_id,
            owner: None,
            is_completed: self.is_completed,
            created_at: self.created_at,
            updated_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            user_id: data.user_id,
            owner: None,
            is_completed: data.is_completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Attaches the owning user for read convenience.
    ///
    /// An owner whose identifier differs from [`Task::user_id`] is ignored.
    #[must_use]
    pub fn with_owner(mut self, owner: Option<User>) -> Self {
        self.owner = owner.filter(|user| user.id() == self.user_id);
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the attached owner, when loaded.
    #[must_use]
    pub const fn owner(&self) -> Option<&User> {
        self.owner.as_ref()
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the task as completed.
    pub fn mark_completed(&mut self, clock: &impl Clock) {
        self.is_completed = true;
        self.touch(clock);
    }

    /// Marks the task as pending again.
    pub fn mark_pending(&mut self, clock: &impl Clock) {
        self.is_completed = false;
        self.touch(clock);
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns a `Title` failure and leaves the task unchanged when the title
    /// is blank or outside the allowed length.
    pub fn update_title(&mut self, title: &str, clock: &impl Clock) -> Result<(), FieldFailure> {
        let trimmed = title.trim();
        if let Some(failure) = validator::title_failure(trimmed) {
            return Err(failure);
        }
        self.title = trimmed.to_owned();
        self.touch(clock);
        Ok(())
    }

    /// Replaces or clears the description.
    ///
    /// # Errors
    ///
    /// Returns a `Description` failure and leaves the task unchanged when the
    /// description is too long.
    pub fn update_description(
        &mut self,
        description: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), FieldFailure> {
        let normalised = normalise_description(description);
        if let Some(failure) = validator::description_failure(normalised.as_deref()) {
            return Err(failure);
        }
        self.description = normalised;
        self.touch(clock);
        Ok(())
    }

    /// Replaces or clears the due date.
    ///
    /// # Errors
    ///
    /// Returns a `DueDate` failure and leaves the task unchanged when the due
    /// date is not after the current clock time.
    pub fn update_due_date(
        &mut self,
        due_date: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Result<(), FieldFailure> {
        let now = clock.utc();
        if let Some(failure) = validator::due_date_failure(due_date.as_ref(), &now) {
            return Err(failure);
        }
        self.due_date = due_date;
        self.updated_at = now;
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.description == other.description
            && self.due_date == other.due_date
            && self.user_id == other.user_id
            && self.is_completed == other.is_completed
            && self.created_at == other.created_at
            && self.updated_at == other.updated_at
    }
}

impl Eq for Task {}

impl Entity for Task {
    type Id = TaskId;

    fn id(&self) -> TaskId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
