//! In-memory repository for tasks.

use crate::persistence::memory::InMemoryTable;
use crate::persistence::{PageRequest, PersistenceResult, Predicate, Repository};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
};
use crate::user::domain::{User, UserId};
use async_trait::async_trait;

/// Thread-safe in-memory task repository.
///
/// Reads attach the owner from the shared users table, mirroring a join.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: InMemoryTable<Task>,
    users: InMemoryTable<User>,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the tasks table, resolving owners from the
    /// users table.
    #[must_use]
    pub const fn new(tasks: InMemoryTable<Task>, users: InMemoryTable<User>) -> Self {
        Self { tasks, users }
    }

    /// Returns the underlying tasks table.
    #[must_use]
    pub const fn tasks(&self) -> &InMemoryTable<Task> {
        &self.tasks
    }

    fn attach_owner(&self, task: Task) -> PersistenceResult<Task> {
        let owner = self.users.get(task.user_id())?;
        Ok(task.with_owner(owner))
    }

    fn attach_owners(&self, tasks: Vec<Task>) -> PersistenceResult<Vec<Task>> {
        tasks
            .into_iter()
            .map(|task| self.attach_owner(task))
            .collect()
    }
}

#[async_trait]
impl Repository<Task> for InMemoryTaskRepository {
    async fn get_by_id(&self, id: TaskId) -> PersistenceResult<Option<Task>> {
        self.tasks
            .get(id)?
            .map(|task| self.attach_owner(task))
            .transpose()
    }

    async fn get_all(&self) -> PersistenceResult<Vec<Task>> {
        self.attach_owners(self.tasks.ordered()?)
    }

    async fn get_page(&self, page: PageRequest) -> PersistenceResult<Vec<Task>> {
        self.attach_owners(page.slice(self.tasks.ordered()?))
    }

    async fn find_by(&self, predicate: &Predicate<'_, Task>) -> PersistenceResult<Vec<Task>> {
        let tasks = self.attach_owners(self.tasks.ordered()?)?;
        Ok(tasks.into_iter().filter(|task| predicate(task)).collect())
    }

    async fn add(&self, entity: Task) -> PersistenceResult<Task> {
        self.tasks.stage_insert(entity.with_owner(None))
    }

    async fn update(&self, entity: Task) -> PersistenceResult<Task> {
        self.tasks.stage_update(entity.with_owner(None))
    }

    async fn delete(&self, entity: &Task) -> PersistenceResult<bool> {
        self.tasks.stage_delete(entity.id())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_by_user(&self, user_id: UserId) -> PersistenceResult<Vec<Task>> {
        let tasks = self.tasks.filter(&|task: &Task| task.user_id() == user_id)?;
        self.attach_owners(tasks)
    }
}
