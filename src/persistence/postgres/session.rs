//! Shared connection pool access and staged-write unit of work.

use crate::persistence::{PersistenceError, PersistenceResult, UnitOfWork};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// `PostgreSQL` connection pool type used by the diesel adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

type StagedStatement = Box<dyn FnOnce(&mut PgConnection) -> QueryResult<usize> + Send>;

/// Pool handle plus the writes staged since the last commit.
///
/// A session stands for one business operation. Clones share the staged
/// writes, so the repositories and unit of work of one operation are built
/// from clones of one session and commit together. Each operation starts
/// from [`PgSession::begin`] so its commit never applies or discards the
/// writes of another operation in flight.
#[derive(Clone)]
pub struct PgSession {
    pool: PgPool,
    staged: Arc<Mutex<Vec<StagedStatement>>>,
}

impl fmt::Debug for PgSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgSession")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl PgSession {
    /// Creates a session over a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            staged: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Starts a session for a new operation.
    ///
    /// The new session shares the pool but none of the staged writes.
    #[must_use]
    pub fn begin(&self) -> Self {
        Self::new(self.pool.clone())
    }

    /// Runs a read on a pooled connection without blocking the async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when no connection can be
    /// obtained or the blocking task fails, or whatever `f` returns.
    pub async fn run_blocking<F, T>(&self, f: F) -> PersistenceResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PersistenceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PersistenceError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PersistenceError::persistence)?
    }

    /// Stages a write for the next commit.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the staging lock is
    /// poisoned.
    pub fn stage<F>(&self, statement: F) -> PersistenceResult<()>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<usize> + Send + 'static,
    {
        self.lock()?.push(Box::new(statement));
        Ok(())
    }

    /// Returns the number of writes waiting for a commit.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Persistence`] when the staging lock is
    /// poisoned.
    pub fn staged_len(&self) -> PersistenceResult<usize> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> PersistenceResult<MutexGuard<'_, Vec<StagedStatement>>> {
        self.staged
            .lock()
            .map_err(|err| PersistenceError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl UnitOfWork for PgSession {
    async fn commit(&self) -> PersistenceResult<usize> {
        let statements = std::mem::take(&mut *self.lock()?);
        if statements.is_empty() {
            return Ok(0);
        }

        let count = statements.len();
        let affected = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|tx| {
                        statements
                            .into_iter()
                            .try_fold(0_usize, |total, statement| {
                                statement(tx).map(|rows| total + rows)
                            })
                    })
                    .map_err(map_diesel_error)
            })
            .await
            .inspect_err(|err| warn!(error = %err, "postgres commit rolled back"))?;
        debug!(statements = count, affected, "postgres commit applied");
        Ok(affected)
    }
}

/// Maps diesel errors onto [`PersistenceError`].
///
/// Unique violations keep the constraint name so callers can tell which
/// index rejected the write.
pub(crate) fn map_diesel_error(err: DieselError) -> PersistenceError {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err
        && let Some(constraint) = info.constraint_name()
    {
        return PersistenceError::unique_violation(constraint);
    }
    match err {
        DieselError::NotFound => PersistenceError::not_found("row"),
        other => PersistenceError::persistence(other),
    }
}
