//! Shared world state for operation result BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    envelope::{ErrorList, OperationResult},
    persistence::memory::{InMemoryDatabase, InMemoryUnitOfWork},
    task::{adapters::memory::InMemoryTaskRepository, domain::Task, services::TaskService},
    user::{
        adapters::memory::InMemoryUserRepository,
        domain::{User, UserId},
        services::UserService,
    },
};

/// User service type used by the BDD world.
pub type TestUserService = UserService<InMemoryUserRepository, InMemoryUnitOfWork, DefaultClock>;

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryUserRepository, InMemoryUnitOfWork, DefaultClock>;

/// Envelope produced by the last `When` step.
#[derive(Debug)]
pub enum LastOutcome {
    /// Result of a user operation.
    User(OperationResult<User>),
    /// Result of a single-task operation.
    Task(OperationResult<Task>),
    /// Result of a delete.
    Deleted(OperationResult<bool>),
    /// Result of a task listing.
    Tasks(OperationResult<Vec<Task>>),
}

impl LastOutcome {
    /// Returns the errors of a failed envelope.
    pub const fn errors(&self) -> Option<&ErrorList> {
        match self {
            Self::User(result) => result.errors(),
            Self::Task(result) => result.errors(),
            Self::Deleted(result) => result.errors(),
            Self::Tasks(result) => result.errors(),
        }
    }
}

/// Scenario world for operation result behaviour tests.
pub struct OperationResultsWorld {
    pub database: InMemoryDatabase,
    pub users: TestUserService,
    pub tasks: TestTaskService,
    pub registered: HashMap<String, UserId>,
    pub last_outcome: Option<LastOutcome>,
}

impl OperationResultsWorld {
    /// Creates a world backed by an empty in-memory database.
    #[must_use]
    pub fn new() -> Self {
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

        Self {
            database,
            users,
            tasks,
            registered: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Looks up a user registered by an earlier step.
    pub fn registered_id(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.registered
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no registered user named {name}"))
    }
}

impl Default for OperationResultsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OperationResultsWorld {
    OperationResultsWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
