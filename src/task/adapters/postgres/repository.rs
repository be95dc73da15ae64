//! `PostgreSQL` repository implementation for task storage.

use super::models::{NewTaskRow, TaskChangeset, TaskRow, row_to_task};
use crate::persistence::postgres::{
    PgSession, map_diesel_error,
    schema::{tasks, users},
};
use crate::persistence::{
    PageRequest, PersistenceError, PersistenceResult, Predicate, Repository,
};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
};
use crate::user::adapters::postgres::UserRow;
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use tracing::debug;

type JoinedRow = (TaskRow, Option<UserRow>);

/// `PostgreSQL`-backed task repository.
///
/// Reads join the owning user; writes are staged on the shared
/// [`PgSession`] and applied when it commits.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    session: PgSession,
}

impl PostgresTaskRepository {
    /// Creates a repository staging writes on `session`.
    #[must_use]
    pub const fn new(session: PgSession) -> Self {
        Self { session }
    }

    async fn exists(&self, id: TaskId) -> PersistenceResult<bool> {
        self.session
            .run_blocking(move |connection| {
                diesel::select(diesel::dsl::exists(
                    tasks::table.filter(tasks::id.eq(id.into_inner())),
                ))
                .get_result(connection)
                .map_err(map_diesel_error)
            })
            .await
    }
}

fn into_tasks(rows: Vec<JoinedRow>) -> Vec<Task> {
    rows.into_iter()
        .map(|(task, owner)| row_to_task(task, owner))
        .collect()
}

#[async_trait]
impl Repository<Task> for PostgresTaskRepository {
    async fn get_by_id(&self, id: TaskId) -> PersistenceResult<Option<Task>> {
        self.session
            .run_blocking(move |connection| {
                let row = tasks::table
                    .left_join(users::table)
                    .filter(tasks::id.eq(id.into_inner()))
                    .select((TaskRow::as_select(), Option::<UserRow>::as_select()))
                    .first::<JoinedRow>(connection)
                    .optional()
                    .map_err(map_diesel_error)?;
                Ok(row.map(|(task, owner)| row_to_task(task, owner)))
            })
            .await
    }

    async fn get_all(&self) -> PersistenceResult<Vec<Task>> {
        self.session
            .run_blocking(|connection| {
                let rows = tasks::table
                    .left_join(users::table)
                    .select((TaskRow::as_select(), Option::<UserRow>::as_select()))
                    .order((tasks::created_at.asc(), tasks::id.asc()))
                    .load::<JoinedRow>(connection)
                    .map_err(map_diesel_error)?;
                Ok(into_tasks(rows))
            })
            .await
    }

    async fn get_page(&self, page: PageRequest) -> PersistenceResult<Vec<Task>> {
        let limit = i64::from(page.size());
        let offset = i64::try_from(page.offset()).map_err(PersistenceError::persistence)?;
        self.session
            .run_blocking(move |connection| {
                let rows = tasks::table
                    .left_join(users::table)
                    .select((TaskRow::as_select(), Option::<UserRow>::as_select()))
                    .order((tasks::created_at.asc(), tasks::id.asc()))
                    .limit(limit)
                    .offset(offset)
                    .load::<JoinedRow>(connection)
                    .map_err(map_diesel_error)?;
                Ok(into_tasks(rows))
            })
            .await
    }

    async fn find_by(&self, predicate: &Predicate<'_, Task>) -> PersistenceResult<Vec<Task>> {
        let tasks = self.get_all().await?;
        Ok(tasks.into_iter().filter(|task| predicate(task)).collect())
    }

    async fn add(&self, entity: Task) -> PersistenceResult<Task> {
        let row = NewTaskRow::from(&entity);
        debug!(id = %entity.id(), "staged task insert");
        self.session.stage(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
        })?;
        Ok(entity)
    }

    async fn update(&self, entity: Task) -> PersistenceResult<Task> {
        let id = entity.id();
        if !self.exists(id).await? {
            return Err(PersistenceError::not_found(id));
        }
        let changeset = TaskChangeset::from(&entity);
        debug!(%id, "staged task update");
        self.session.stage(move |connection| {
            diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .set(&changeset)
                .execute(connection)
        })?;
        Ok(entity)
    }

    async fn delete(&self, entity: &Task) -> PersistenceResult<bool> {
        let id = entity.id();
        if !self.exists(id).await? {
            return Ok(false);
        }
        debug!(%id, "staged task delete");
        self.session.stage(move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner()))).execute(connection)
        })?;
        Ok(true)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list_by_user(&self, user_id: UserId) -> PersistenceResult<Vec<Task>> {
        self.session
            .run_blocking(move |connection| {
                let rows = tasks::table
                    .left_join(users::table)
                    .filter(tasks::user_id.eq(user_id.into_inner()))
                    .select((TaskRow::as_select(), Option::<UserRow>::as_select()))
                    .order((tasks::created_at.asc(), tasks::id.asc()))
                    .load::<JoinedRow>(connection)
                    .map_err(map_diesel_error)?;
                Ok(into_tasks(rows))
            })
            .await
    }
}
