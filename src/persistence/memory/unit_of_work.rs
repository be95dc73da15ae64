//! In-memory unit of work spanning several tables.

use super::{InMemoryTable, table::StagedTable};
use crate::persistence::{Entity, PersistenceError, PersistenceResult, UnitOfWork};
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Commits staged writes of every registered table.
///
/// Tables are prepared in registration order; if any table rejects its
/// writes, every table is rolled back and nothing becomes visible.
///
/// Clones share one commit lock, so a commit prepares and publishes its
/// tables without another clone's commit interleaving. Staged writes belong
/// to the tables, not to the caller: a commit applies every write pending on
/// its tables, and a rejected commit discards all of them.
#[derive(Clone, Default)]
pub struct InMemoryUnitOfWork {
    tables: Vec<Arc<dyn StagedTable>>,
    commit_lock: Arc<Mutex<()>>,
}

impl fmt::Debug for InMemoryUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryUnitOfWork")
            .field("tables", &self.tables.len())
            .finish_non_exhaustive()
    }
}

impl InMemoryUnitOfWork {
    /// Creates a unit of work with no registered tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table whose staged writes this unit of work commits.
    #[must_use]
    pub fn with_table<E: Entity>(mut self, table: &InMemoryTable<E>) -> Self {
        self.tables.push(Arc::new(table.clone()));
        self
    }

    fn rollback_all(&self) -> PersistenceResult<()> {
        for table in &self.tables {
            table.rollback()?;
        }
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn commit(&self) -> PersistenceResult<usize> {
        let _serialised = self
            .commit_lock
            .lock()
            .map_err(|err| PersistenceError::persistence(std::io::Error::other(err.to_string())))?;
        let mut affected = 0;
        for table in &self.tables {
            match table.prepare() {
                Ok(count) => affected += count,
                Err(err) => {
                    warn!(error = %err, "in-memory commit rejected, rolling back");
                    self.rollback_all()?;
                    return Err(err);
                }
            }
        }
        for table in &self.tables {
            table.finish()?;
        }
        debug!(affected, "in-memory commit applied");
        Ok(affected)
    }
}
