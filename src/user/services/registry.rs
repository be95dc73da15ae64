//! Service layer for registering and maintaining users.

use crate::config::ServiceConfig;
use crate::envelope::{OperationResult, StatusClass};
use crate::persistence::{PageRequest, ServiceResult, UnitOfWork};
use crate::user::{
    domain::{EMAIL_KEY, User, UserId},
    ports::UserRepository,
};
use crate::validation::Validate;
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Message reported when an email address belongs to another user.
pub const EMAIL_TAKEN: &str = "email is already registered";
/// Message reported when the target user does not exist.
pub const USER_NOT_FOUND: &str = "user not found";

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    email: String,
}

impl CreateUserRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request payload replacing a user's details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    name: String,
    email: String,
}

impl UpdateUserRequest {
    /// Creates an update request carrying the full replacement details.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// User orchestration service.
///
/// Every operation returns an [`OperationResult`] for validation failures,
/// missing records and business-rule conflicts. Persistence failures are
/// returned as `Err` untouched.
#[derive(Clone)]
pub struct UserService<R, W, C>
where
    R: UserRepository,
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    unit_of_work: Arc<W>,
    clock: Arc<C>,
    config: ServiceConfig,
}

impl<R, W, C> UserService<R, W, C>
where
    R: UserRepository,
    W: UnitOfWork,
    C: Clock + Send + Sync,
{
    /// Creates a user service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, unit_of_work: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            repository,
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

    /// Registers a new user.
    ///
    /// Structural validation runs before the email uniqueness check.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository or unit of work fails.
    pub async fn add(&self, request: CreateUserRequest) -> ServiceResult<User> {
        let user = User::create(&request.name, &request.email, &*self.clock);
        if let Some(rejected) = OperationResult::from_validation(user.validate()) {
            warn!(user_id = %user.id(), "user registration failed validation");
            return Ok(rejected);
        }

        if self.repository.find_by_email(user.email()).await?.is_some() {
            warn!(email = %user.email(), "user registration rejected: email taken");
            return Ok(OperationResult::error(
                StatusClass::BAD_REQUEST,
                EMAIL_TAKEN,
                EMAIL_KEY,
            ));
        }

        let stored = self.repository.add(user).await?;
        self.unit_of_work.commit().await?;
        info!(user_id = %stored.id(), "user registered");
        Ok(OperationResult::success(stored))
    }

    /// Replaces the name and email of an existing user.
    ///
    /// The target must exist before the replacement is validated. The email
    /// uniqueness check only runs when the address changes.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository or unit of work fails.
    pub async fn update(&self, id: UserId, request: UpdateUserRequest) -> ServiceResult<User> {
        let Some(existing) = self.repository.get_by_id(id).await? else {
            return Ok(OperationResult::not_found(USER_NOT_FOUND));
        };

        let replacement = existing.with_details(&request.name, &request.email);
        if let Some(rejected) = OperationResult::from_validation(replacement.validate()) {
            warn!(user_id = %id, "user update failed validation");
            return Ok(rejected);
        }

        if replacement.email() != existing.email()
            && let Some(owner) = self.repository.find_by_email(replacement.email()).await?
            && owner.id() != id
        {
            warn!(user_id = %id, email = %replacement.email(), "user update rejected: email taken");
            return Ok(OperationResult::error(
                StatusClass::BAD_REQUEST,
                EMAIL_TAKEN,
                EMAIL_KEY,
            ));
        }

        let stored = self.repository.update(replacement).await?;
        self.unit_of_work.commit().await?;
        info!(user_id = %id, "user updated");
        Ok(OperationResult::success(stored))
    }

    /// Deletes a user.
    ///
    /// Succeeds with `true` when the commit affected at least one row and
    /// with `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository or unit of work fails.
    pub async fn delete(&self, id: UserId) -> ServiceResult<bool> {
        let Some(existing) = self.repository.get_by_id(id).await? else {
            return Ok(OperationResult::not_found(USER_NOT_FOUND));
        };

        self.repository.delete(&existing).await?;
        let affected = self.unit_of_work.commit().await?;
        info!(user_id = %id, affected, "user deleted");
        Ok(OperationResult::success(affected > 0))
    }

    /// Retrieves a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository fails.
    pub async fn get_by_id(&self, id: UserId) -> ServiceResult<User> {
        Ok(self
            .repository
            .get_by_id(id)
            .await?
            .map_or_else(|| OperationResult::not_found(USER_NOT_FOUND), OperationResult::success))
    }

    /// Lists one page of users ordered by creation time.
    ///
    /// Page numbers start at `1`; a zero page size selects the configured
    /// default. An empty store yields an empty success.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`](crate::persistence::PersistenceError)
    /// when the repository fails.
    pub async fn get_all(&self, page_number: u32, page_size: u32) -> ServiceResult<Vec<User>> {
        let page = PageRequest::new(page_number, page_size, &self.config.pagination);
        let users = self.repository.get_page(page).await?;
        Ok(OperationResult::success(users))
    }
}
