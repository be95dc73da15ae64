//! Wiring of the in-memory tables for users and tasks.

use super::{InMemoryTable, InMemoryUnitOfWork};
use crate::task::{adapters::memory::InMemoryTaskRepository, domain::Task};
use crate::user::{adapters::memory::InMemoryUserRepository, domain::User};

/// In-memory store holding the users and tasks tables.
///
/// Repositories and units of work handed out by one database share the same
/// tables, so writes staged through either repository are committed together.
/// Units of work share one commit lock, so concurrent commits never lose each
/// other's writes. Deleting a user through [`InMemoryDatabase::user_repository`]
/// also deletes the user's tasks, as the `PostgreSQL` foreign key does.
#[derive(Debug, Clone)]
pub struct InMemoryDatabase {
    users: InMemoryTable<User>,
    tasks: InMemoryTable<Task>,
    unit_of_work: InMemoryUnitOfWork,
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        let users = InMemoryUserRepository::table();
        let tasks = InMemoryTable::new();
        let unit_of_work = InMemoryUnitOfWork::new()
            .with_table(&users)
            .with_table(&tasks);
        Self {
            users,
            tasks,
            unit_of_work,
        }
    }
}

impl InMemoryDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a user repository over the shared users table whose deletes
    /// cascade to the user's tasks.
    #[must_use]
    pub fn user_repository(&self) -> InMemoryUserRepository {
        InMemoryUserRepository::new(self.users.clone()).with_owned_tasks(self.tasks.clone())
    }

    /// Returns a task repository over the shared tasks table.
    #[must_use]
    pub fn task_repository(&self) -> InMemoryTaskRepository {
        InMemoryTaskRepository::new(self.tasks.clone(), self.users.clone())
    }

    /// Returns a unit of work committing both tables.
    ///
    /// Every unit of work from one database shares its commit lock.
    #[must_use]
    pub fn unit_of_work(&self) -> InMemoryUnitOfWork {
        self.unit_of_work.clone()
    }
}
