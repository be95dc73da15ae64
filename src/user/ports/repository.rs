//! Repository port for user persistence and lookup.

use crate::persistence::{PersistenceResult, Repository};
use crate::user::domain::{Email, User};
use async_trait::async_trait;

/// User persistence contract.
///
/// Extends the generic [`Repository`] with an email lookup used to enforce
/// address uniqueness before writes are staged.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Finds the committed user registered with `email`.
    ///
    /// Comparison is exact on the trimmed address.
    async fn find_by_email(&self, email: &Email) -> PersistenceResult<Option<User>>;
}
