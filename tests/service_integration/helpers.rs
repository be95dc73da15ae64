//! Shared test helpers for service integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    envelope::OperationResult,
    persistence::memory::{InMemoryDatabase, InMemoryUnitOfWork},
    task::{adapters::memory::InMemoryTaskRepository, services::TaskService},
    user::{
        adapters::memory::InMemoryUserRepository,
        domain::User,
        services::{CreateUserRequest, UserService},
    },
};

/// User service wired to the in-memory database.
pub type TestUserService = UserService<InMemoryUserRepository, InMemoryUnitOfWork, DefaultClock>;

/// Task service wired to the in-memory database.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryUserRepository, InMemoryUnitOfWork, DefaultClock>;

/// Both services sharing one in-memory database.
pub struct Services {
    pub database: InMemoryDatabase,
    pub users: TestUserService,
    pub tasks: TestTaskService,
}

impl Services {
    /// Registers a user and returns the stored entity.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or the user is rejected.
    pub async fn register(&self, name: &str, email: &str) -> Result<User, eyre::Report> {
        let result = self.users.add(CreateUserRequest::new(name, email)).await?;
        into_value(result)
    }
}

/// Provides services over a fresh in-memory database.
#[fixture]
pub fn services() -> Services {
    let database = InMemoryDatabase::new();
    let unit_of_work = Arc::new(database.unit_of_work());
    let user_repository = Arc::new(database.user_repository());
    let clock = Arc::new(DefaultClock);

    let users = UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&unit_of_work),
        Arc::clone(&clock),
    );
    let tasks = TaskService::new(
        Arc::new(database.task_repository()),
        user_repository,
        unit_of_work,
        clock,
    );

    Services {
        database,
        users,
        tasks,
    }
}

/// Unwraps a successful envelope.
///
/// # Errors
///
/// Returns an error describing the first failure of a failed envelope.
pub fn into_value<T>(result: OperationResult<T>) -> Result<T, eyre::Report> {
    result
        .into_result()
        .map_err(|errors| eyre::eyre!("operation failed: {}", errors.first()))
}
