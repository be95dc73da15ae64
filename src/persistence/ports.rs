//! Repository and unit-of-work port contracts.

use super::PageRequest;
use crate::envelope::OperationResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Result type for service operations.
///
/// The envelope carries every recoverable outcome; `Err` is reserved for
/// collaborator failures raised by the persistence layer.
pub type ServiceResult<T> = Result<OperationResult<T>, PersistenceError>;

/// Predicate used by [`Repository::find_by`].
pub type Predicate<'a, E> = dyn Fn(&E) -> bool + Send + Sync + 'a;

/// Identity and ordering information every persisted entity exposes.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identifier type, assigned at construction and immutable thereafter.
    type Id: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Returns the creation timestamp used for stable list ordering.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Generic persistence contract.
///
/// Writes are staged and only become visible to readers once the shared
/// [`UnitOfWork`] commits. Repositories never commit on their own.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Finds an entity by identifier.
    ///
    /// Returns `None` when the entity does not exist.
    async fn get_by_id(&self, id: E::Id) -> PersistenceResult<Option<E>>;

    /// Returns all entities ordered by creation time, then identifier.
    async fn get_all(&self) -> PersistenceResult<Vec<E>>;

    /// Returns one page of entities using the same ordering as
    /// [`Repository::get_all`].
    async fn get_page(&self, page: PageRequest) -> PersistenceResult<Vec<E>>;

    /// Returns all entities matching `predicate`, in list order.
    async fn find_by(&self, predicate: &Predicate<'_, E>) -> PersistenceResult<Vec<E>>;

    /// Stages a new entity for insertion.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Duplicate`] when the identifier already
    /// exists.
    async fn add(&self, entity: E) -> PersistenceResult<E>;

    /// Stages a replacement for an existing entity.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] when the entity does not exist.
    async fn update(&self, entity: E) -> PersistenceResult<E>;

    /// Stages removal of an entity.
    ///
    /// Returns whether a removal was staged.
    async fn delete(&self, entity: &E) -> PersistenceResult<bool>;
}

/// Commits every write staged by the repositories sharing this unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Applies all staged writes atomically.
    ///
    /// Returns the number of rows actually affected.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the storage rejects the writes; no
    /// staged write is applied in that case.
    async fn commit(&self) -> PersistenceResult<usize>;
}

/// Errors returned by persistence adapters.
///
/// These are collaborator failures: services propagate them unmodified.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// A record with the same identifier already exists.
    #[error("duplicate record identifier: {0}")]
    Duplicate(String),

    /// The record was not found.
    #[error("record not found: {0}")]
    NotFound(String),

    /// A storage-level unique constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint.
        constraint: String,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Creates a duplicate-identifier error.
    pub fn duplicate(id: impl fmt::Display) -> Self {
        Self::Duplicate(id.to_string())
    }

    /// Creates a not-found error.
    pub fn not_found(id: impl fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }

    /// Creates a unique-violation error.
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }
}
