//! Thread-safe in-memory table with staged writes.

use crate::persistence::{Entity, PersistenceError, PersistenceResult, Predicate};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Storage-level uniqueness constraint over a derived key.
pub struct UniqueKey<E> {
    constraint: &'static str,
    key: fn(&E) -> String,
}

impl<E> UniqueKey<E> {
    /// Creates a constraint named `constraint` over the key returned by `key`.
    #[must_use]
    pub const fn new(constraint: &'static str, key: fn(&E) -> String) -> Self {
        Self { constraint, key }
    }
}

impl<E> fmt::Debug for UniqueKey<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueKey")
            .field("constraint", &self.constraint)
            .finish_non_exhaustive()
    }
}

enum StagedWrite<E: Entity> {
    Insert(E),
    Update(E),
    Delete(E::Id),
}

struct TableState<E: Entity> {
    rows: HashMap<E::Id, E>,
    staged: Vec<StagedWrite<E>>,
    prepared: Option<HashMap<E::Id, E>>,
}

impl<E: Entity> Default for TableState<E> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            staged: Vec::new(),
            prepared: None,
        }
    }
}

/// Shared in-memory table for one entity type.
///
/// Clones share the same rows.
pub struct InMemoryTable<E: Entity> {
    state: Arc<RwLock<TableState<E>>>,
    unique_keys: Arc<Vec<UniqueKey<E>>>,
}

impl<E: Entity> Clone for InMemoryTable<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            unique_keys: Arc::clone(&self.unique_keys),
        }
    }
}

impl<E: Entity> Default for InMemoryTable<E> {
    fn default() -> Self {
        Self::with_unique_keys(Vec::new())
    }
}

impl<E: Entity> fmt::Debug for InMemoryTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTable")
            .field("unique_keys", &self.unique_keys)
            .finish_non_exhaustive()
    }
}

fn lock_error(err: impl fmt::Display) -> PersistenceError {
    PersistenceError::persistence(std::io::Error::other(err.to_string()))
}

impl<E: Entity> InMemoryTable<E> {
    /// Creates an empty table without constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table enforcing the given uniqueness constraints on
    /// commit.
    #[must_use]
    pub fn with_unique_keys(unique_keys: Vec<UniqueKey<E>>) -> Self {
        Self {
            state: Arc::new(RwLock::new(TableState::default())),
            unique_keys: Arc::new(unique_keys),
        }
    }

    fn read(&self) -> PersistenceResult<RwLockReadGuard<'_, TableState<E>>> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> PersistenceResult<RwLockWriteGuard<'_, TableState<E>>> {
        self.state.write().map_err(lock_error)
    }

    /// Returns the committed row with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the table lock is
    /// poisoned.
    pub fn get(&self, id: E::Id) -> PersistenceResult<Option<E>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    /// Returns committed rows ordered by creation time, then identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the table lock is
    /// poisoned.
    pub fn ordered(&self) -> PersistenceResult<Vec<E>> {
        let mut rows: Vec<E> = self.read()?.rows.values().cloned().collect();
        rows.sort_by_key(|row| (row.created_at(), row.id()));
        Ok(rows)
    }

    /// Returns committed rows matching `predicate`, in list order.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the table lock is
    /// poisoned.
    pub fn filter(&self, predicate: &Predicate<'_, E>) -> PersistenceResult<Vec<E>> {
        Ok(self
            .ordered()?
            .into_iter()
            .filter(|row| predicate(row))
            .collect())
    }

    /// Returns the number of committed rows.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the table lock is
    /// poisoned.
    pub fn len(&self) -> PersistenceResult<usize> {
        Ok(self.read()?.rows.len())
    }

    /// Returns `true` when no row is committed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the table lock is
    /// poisoned.
    pub fn is_empty(&self) -> PersistenceResult<bool> {
        Ok(self.read()?.rows.is_empty())
    }

    /// Returns the number of writes waiting for a commit.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the table lock is
    /// poisoned.
    pub fn staged_len(&self) -> PersistenceResult<usize> {
        Ok(self.read()?.staged.len())
    }

    /// Stages an insert.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Duplicate`] when the identifier is already
    /// committed or staged for insertion.
    pub fn stage_insert(&self, entity: E) -> PersistenceResult<E> {
        let mut state = self.write()?;
        let id = entity.id();
        let already_staged = state
            .staged
            .iter()
            .any(|write| matches!(write, StagedWrite::Insert(staged) if staged.id() == id));
        if state.rows.contains_key(&id) || already_staged {
            return Err(PersistenceError::duplicate(id));
        }
        debug!(%id, "staged insert");
        state.staged.push(StagedWrite::Insert(entity.clone()));
        Ok(entity)
    }

    /// Stages a replacement of a committed row.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::NotFound`] when no committed row has the
    /// identifier.
    pub fn stage_update(&self, entity: E) -> PersistenceResult<E> {
        let mut state = self.write()?;
        let id = entity.id();
        if !state.rows.contains_key(&id) {
            return Err(PersistenceError::not_found(id));
        }
        debug!(%id, "staged update");
        state.staged.push(StagedWrite::Update(entity.clone()));
        Ok(entity)
    }

    /// Stages removal of a committed row.
    ///
    /// Returns `false` without staging anything when the row is absent.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the table lock is
    /// poisoned.
    pub fn stage_delete(&self, id: E::Id) -> PersistenceResult<bool> {
        let mut state = self.write()?;
        if !state.rows.contains_key(&id) {
            return Ok(false);
        }
        debug!(%id, "staged delete");
        state.staged.push(StagedWrite::Delete(id));
        Ok(true)
    }

    fn check_unique(&self, rows: &HashMap<E::Id, E>) -> PersistenceResult<()> {
        for unique in self.unique_keys.iter() {
            let mut seen = HashSet::with_capacity(rows.len());
            if rows.values().any(|row| !seen.insert((unique.key)(row))) {
                return Err(PersistenceError::unique_violation(unique.constraint));
            }
        }
        Ok(())
    }
}

/// Type-erased view of a table used by the unit of work.
pub(super) trait StagedTable: Send + Sync {
    /// Computes the post-commit rows, returning the affected row count.
    fn prepare(&self) -> PersistenceResult<usize>;
    /// Publishes the prepared rows.
    fn finish(&self) -> PersistenceResult<()>;
    /// Drops staged and prepared writes.
    fn rollback(&self) -> PersistenceResult<()>;
}

impl<E: Entity> StagedTable for InMemoryTable<E> {
    fn prepare(&self) -> PersistenceResult<usize> {
        let mut state = self.write()?;
        let staged = std::mem::take(&mut state.staged);
        let mut next = state.rows.clone();
        let mut affected = 0;

        for write in staged {
            let changed = match write {
                StagedWrite::Insert(entity) | StagedWrite::Update(entity) => {
                    next.insert(entity.id(), entity);
                    true
                }
                StagedWrite::Delete(id) => next.remove(&id).is_some(),
            };
            if changed {
                affected += 1;
            }
        }

        self.check_unique(&next)?;
        state.prepared = Some(next);
        Ok(affected)
    }

    fn finish(&self) -> PersistenceResult<()> {
        let mut state = self.write()?;
        if let Some(next) = state.prepared.take() {
            state.rows = next;
        }
        Ok(())
    }

    fn rollback(&self) -> PersistenceResult<()> {
        let mut state = self.write()?;
        state.staged.clear();
        state.prepared = None;
        Ok(())
    }
}
