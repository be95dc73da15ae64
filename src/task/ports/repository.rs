//! Repository port for task persistence and lookup.

use crate::persistence::{PersistenceResult, Repository};
use crate::task::domain::Task;
use crate::user::domain::UserId;
use async_trait::async_trait;

/// Task persistence contract.
///
/// Reads attach the owning user to each returned task when it exists.
#[async_trait]
pub trait TaskRepository: Repository<Task> {
    /// Returns the committed tasks owned by `user_id`, in list order.
    async fn list_by_user(&self, user_id: UserId) -> PersistenceResult<Vec<Task>>;
}
