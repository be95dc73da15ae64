//! In-memory repository for users.

use crate::persistence::memory::{InMemoryTable, UniqueKey};
use crate::persistence::{PageRequest, PersistenceResult, Predicate, Repository};
use crate::task::domain::Task;
use crate::user::{
    domain::{Email, User, UserId},
    ports::UserRepository,
};
use async_trait::async_trait;

/// Name of the uniqueness constraint on user email addresses.
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Thread-safe in-memory user repository.
///
/// Writes are staged on the shared users table and become visible once the
/// owning [`InMemoryUnitOfWork`](crate::persistence::memory::InMemoryUnitOfWork)
/// commits. When built [`with_owned_tasks`](Self::with_owned_tasks), deleting
/// a user also stages removal of every task the user owns.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: InMemoryTable<User>,
    owned_tasks: Option<InMemoryTable<Task>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new(Self::table())
    }
}

impl InMemoryUserRepository {
    /// Creates a repository over an existing users table.
    #[must_use]
    pub const fn new(users: InMemoryTable<User>) -> Self {
        Self {
            users,
            owned_tasks: None,
        }
    }

    /// Cascades user deletes to the tasks table.
    #[must_use]
    pub fn with_owned_tasks(mut self, tasks: InMemoryTable<Task>) -> Self {
        self.owned_tasks = Some(tasks);
        self
    }

    /// Creates an empty users table enforcing unique email addresses.
    #[must_use]
    pub fn table() -> InMemoryTable<User> {
        InMemoryTable::with_unique_keys(vec![UniqueKey::new(USERS_EMAIL_KEY, |user: &User| {
            user.email().as_str().to_owned()
        })])
    }

    /// Returns the underlying table.
    #[must_use]
    pub const fn users(&self) -> &InMemoryTable<User> {
        &self.users
    }
}

#[async_trait]
impl Repository<User> for InMemoryUserRepository {
    async fn get_by_id(&self, id: UserId) -> PersistenceResult<Option<User>> {
        self.users.get(id)
    }

    async fn get_all(&self) -> PersistenceResult<Vec<User>> {
        self.users.ordered()
    }

    async fn get_page(&self, page: PageRequest) -> PersistenceResult<Vec<User>> {
        Ok(page.slice(self.users.ordered()?))
    }

    async fn find_by(&self, predicate: &Predicate<'_, User>) -> PersistenceResult<Vec<User>> {
        self.users.filter(predicate)
    }

    async fn add(&self, entity: User) -> PersistenceResult<User> {
        self.users.stage_insert(entity)
    }

    async fn update(&self, entity: User) -> PersistenceResult<User> {
        self.users.stage_update(entity)
    }

    async fn delete(&self, entity: &User) -> PersistenceResult<bool> {
        let id = entity.id();
        let staged = self.users.stage_delete(id)?;
        if staged && let Some(tasks) = &self.owned_tasks {
            for task in tasks.filter(&|task: &Task| task.user_id() == id)? {
                tasks.stage_delete(task.id())?;
            }
        }
        Ok(staged)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> PersistenceResult<Option<User>> {
        let matches = self.users.filter(&|user: &User| user.email() == email)?;
        Ok(matches.into_iter().next())
    }
}
