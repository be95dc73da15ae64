//! Service layer for creating, editing and completing tasks.

use crate::config::ServiceConfig;
use crate::envelope::{OperationResult, StatusClass};
use crate::persistence::{PageRequest, ServiceResult, UnitOfWork};
use crate::task::{
    domain::{Task, TaskDraft, TaskId, USER_ID_KEY},
    ports::TaskRepository,
};
use crate::user::{domain::UserId, ports::UserRepository};
use crate::validation::Validate;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Message reported when the target task does not exist.
pub const TASK_NOT_FOUND: &str = "task not found";
/// Message reported when the referenced owner does not exist.
pub const OWNER_NOT_FOUND: &str = "associated user was not found";

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    draft: TaskDraft,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, user_id: UserId) -> Self {
        Self {
            draft: TaskDraft::new(title, user_id),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.draft = self.draft.with_description(description);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.draft = self.draft.with_due_date(due_date);
        self
    }
}

/// Request payload replacing a task's editable fields.
///
/// Omitted optional fields are cleared. The completion flag is only changed
/// through [`TaskService::complete`] and [`TaskService::reopen`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    draft: TaskDraft,
}

impl UpdateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, user_id: UserId) -> Self {
        Self {
            draft: TaskDraft::new(title, user_id),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.draft = self.draft.with_description(description);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.draft = self.draft.with_due_date(due_date);
        self
    }
}

/// Task orchestration service.
///
/// Recoverable outcomes are returned as [`OperationResult`]s; persistence
/// failures are returned as `Err` untouched.
#[derive(Clone)]
pub struct TaskService<T, U, W, C>
where
    T: TaskRepository,
    U: UserRepository,
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    unit_of_work: Arc<W>,
    clock: Arc<C>,
    config: ServiceConfig,
}

impl<T, U, W, C> TaskService<T, U, W, C>
where
    T: TaskRepository,
    U: UserRepository,
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    /// Creates a task service with the default configuration.
    #[must_use]
    pub fn new(tasks: Arc<T>, users: Arc<U>, unit_of_work: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            users,
            unit_of_work,
            clock,
            config: ServiceConfig::default(),
        }
    }

    /// Replaces the service configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates a task for an existing user.
    ///
    /// Structural validation runs before the owner existence check.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when a repository or the unit of work fails.
    pub async fn add(&self, request: CreateTaskRequest) -> ServiceResult<Task> {
        let task = Task::create(request.draft, &*self.clock);
        if let Some(rejected) = OperationResult::from_validation(task.validate()) {
            warn!(task_id = %task.id(), "task creation failed validation");
            return Ok(rejected);
        }

        let Some(owner) = self.users.get_by_id(task.user_id()).await? else {
            warn!(user_id = %task.user_id(), "task creation rejected: owner missing");
            return Ok(owner_not_found());
        };

        let stored = self.tasks.add(task).await?;
        self.unit_of_work.commit().await?;
        info!(task_id = %stored.id(), user_id = %owner.id(), "task created");
        Ok(OperationResult::success(stored.with_owner(Some(owner))))
    }

    /// Replaces the editable fields of an existing task.
    ///
    /// The target must exist before the replacement is validated. The owner
    /// existence check only runs when the owner changes.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when a repository or the unit of work fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> ServiceResult<Task> {
        let Some(existing) = self.tasks.get_by_id(id).await? else {
            return Ok(OperationResult::not_found(TASK_NOT_FOUND));
        };

        let replacement = existing.replace(request.draft, &*self.clock);
        if let Some(rejected) = OperationResult::from_validation(replacement.validate()) {
            warn!(task_id = %id, "task update failed validation");
            return Ok(rejected);
        }

        let owner = if replacement.user_id() == existing.user_id() {
            existing.owner().cloned()
        } else {
            let Some(owner) = self.users.get_by_id(replacement.user_id()).await? else {
                warn!(
                    task_id = %id,
                    user_id = %replacement.user_id(),
                    "task update rejected: owner missing"
                );
                return Ok(owner_not_found());
            };
            Some(owner)
        };

        let stored = self.tasks.update(replacement).await?;
        self.unit_of_work.commit().await?;
        info!(task_id = %id, "task updated");
        Ok(OperationResult::success(stored.with_owner(owner)))
    }

    /// Marks a task as completed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository or the unit of work fails.
    pub async fn complete(&self, id: TaskId) -> ServiceResult<Task> {
        self.transition(id, |task, clock| task.mark_completed(clock)).await
    }

    /// Marks a completed task as pending again.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository or the unit of work fails.
    pub async fn reopen(&self, id: TaskId) -> ServiceResult<Task> {
        self.transition(id, |task, clock| task.mark_pending(clock)).await
    }

    async fn transition(
        &self,
        id: TaskId,
        apply: impl FnOnce(&mut Task, &C) + Send,
    ) -> ServiceResult<Task> {
        let Some(mut task) = self.tasks.get_by_id(id).await? else {
            return Ok(OperationResult::not_found(TASK_NOT_FOUND));
        };
        if let Some(rejected) = OperationResult::from_validation(task.validate()) {
            warn!(task_id = %id, "task transition failed validation");
            return Ok(rejected);
        }

        apply(&mut task, &*self.clock);
        let owner = task.owner().cloned();
        let stored = self.tasks.update(task).await?;
        self.unit_of_work.commit().await?;
        info!(task_id = %id, completed = stored.is_completed(), "task transitioned");
        Ok(OperationResult::success(stored.with_owner(owner)))
    }

    /// Deletes a task.
    ///
    /// Succeeds with `true` when the commit affected at least one row and
    /// with `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository or the unit of work fails.
    pub async fn delete(&self, id: TaskId) -> ServiceResult<bool> {
        let Some(existing) = self.tasks.get_by_id(id).await? else {
            return Ok(OperationResult::not_found(TASK_NOT_FOUND));
        };

        self.tasks.delete(&existing).await?;
        let affected = self.unit_of_work.commit().await?;
        info!(task_id = %id, affected, "task deleted");
        Ok(OperationResult::success(affected > 0))
    }

    /// Retrieves a task by identifier, with its owner attached.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository fails.
    pub async fn get_by_id(&self, id: TaskId) -> ServiceResult<Task> {
        Ok(self
            .tasks
            .get_by_id(id)
            .await?
            .map_or_else(|| OperationResult::not_found(TASK_NOT_FOUND), OperationResult::success))
    }

    /// Lists one page of tasks ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository fails.
    pub async fn get_all(&self, page_number: u32, page_size: u32) -> ServiceResult<Vec<Task>> {
        let page = PageRequest::new(page_number, page_size, &self.config.pagination);
        Ok(OperationResult::success(self.tasks.get_page(page).await?))
    }

    /// Lists every task owned by a user.
    ///
    /// An unknown user simply owns no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository fails.
    pub async fn list_by_user(&self, user_id: UserId) -> ServiceResult<Vec<Task>> {
        Ok(OperationResult::success(self.tasks.list_by_user(user_id).await?))
    }
}

fn owner_not_found<V>() -> OperationResult<V> {
    OperationResult::error(StatusClass::BAD_REQUEST, OWNER_NOT_FOUND, USER_ID_KEY)
}
