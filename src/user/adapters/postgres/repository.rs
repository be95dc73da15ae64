//! `PostgreSQL` repository implementation for user storage.

use super::models::{NewUserRow, UserChangeset, UserRow};
use crate::persistence::postgres::{PgSession, map_diesel_error, schema::users};
use crate::persistence::{
    PageRequest, PersistenceError, PersistenceResult, Predicate, Repository,
};
use crate::user::{
    domain::{Email, User, UserId},
    ports::UserRepository,
};
use async_trait::async_trait;
use diesel::prelude::*;
use tracing::debug;

/// `PostgreSQL`-backed user repository.
///
/// Writes are staged on the shared [`PgSession`] and applied when it commits.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    session: PgSession,
}

impl PostgresUserRepository {
    /// Creates a repository staging writes on `session`.
    #[must_use]
    pub const fn new(session: PgSession) -> Self {
        Self { session }
    }

    async fn exists(&self, id: UserId) -> PersistenceResult<bool> {
        self.session
            .run_blocking(move |connection| {
                diesel::select(diesel::dsl::exists(
                    users::table.filter(users::id.eq(id.into_inner())),
                ))
                .get_result(connection)
                .map_err(map_diesel_error)
            })
            .await
    }
}

#[async_trait]
impl Repository<User> for PostgresUserRepository {
    async fn get_by_id(&self, id: UserId) -> PersistenceResult<Option<User>> {
        self.session
            .run_blocking(move |connection| {
                let row = users::table
                    .filter(users::id.eq(id.into_inner()))
                    .select(UserRow::as_select())
                    .first::<UserRow>(connection)
                    .optional()
                    .map_err(map_diesel_error)?;
                Ok(row.map(User::from))
            })
            .await
    }

    async fn get_all(&self) -> PersistenceResult<Vec<User>> {
        self.session
            .run_blocking(|connection| {
                let rows = users::table
                    .select(UserRow::as_select())
                    .order((users::created_at.asc(), users::id.asc()))
                    .load::<UserRow>(connection)
                    .map_err(map_diesel_error)?;
                Ok(rows.into_iter().map(User::from).collect())
            })
            .await
    }

    async fn get_page(&self, page: PageRequest) -> PersistenceResult<Vec<User>> {
        let limit = i64::from(page.size());
        let offset = i64::try_from(page.offset()).map_err(PersistenceError::persistence)?;
        self.session
            .run_blocking(move |connection| {
                let rows = users::table
                    .select(UserRow::as_select())
                    .order((users::created_at.asc(), users::id.asc()))
                    .limit(limit)
                    .offset(offset)
                    .load::<UserRow>(connection)
                    .map_err(map_diesel_error)?;
                Ok(rows.into_iter().map(User::from).collect())
            })
            .await
    }

    async fn find_by(&self, predicate: &Predicate<'_, User>) -> PersistenceResult<Vec<User>> {
        let users = self.get_all().await?;
        Ok(users.into_iter().filter(|user| predicate(user)).collect())
    }

    async fn add(&self, entity: User) -> PersistenceResult<User> {
        let row = NewUserRow::from(&entity);
        debug!(id = %entity.id(), "staged user insert");
        self.session.stage(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
        })?;
        Ok(entity)
    }

    async fn update(&self, entity: User) -> PersistenceResult<User> {
        let id = entity.id();
        if !self.exists(id).await? {
            return Err(PersistenceError::not_found(id));
        }
        let changeset = UserChangeset::from(&entity);
        debug!(%id, "staged user update");
        self.session.stage(move |connection| {
            diesel::update(users::table.filter(users::id.eq(id.into_inner())))
                .set(&changeset)
                .execute(connection)
        })?;
        Ok(entity)
    }

    async fn delete(&self, entity: &User) -> PersistenceResult<bool> {
        let id = entity.id();
        if !self.exists(id).await? {
            return Ok(false);
        }
        debug!(%id, "staged user delete");
        self.session.stage(move |connection| {
            diesel::delete(users::table.filter(users::id.eq(id.into_inner()))).execute(connection)
        })?;
        Ok(true)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &Email) -> PersistenceResult<Option<User>> {
        let address = email.as_str().to_owned();
        self.session
            .run_blocking(move |connection| {
                let row = users::table
                    .filter(users::email.eq(address))
                    .select(UserRow::as_select())
                    .first::<UserRow>(connection)
                    .optional()
                    .map_err(map_diesel_error)?;
                Ok(row.map(User::from))
            })
            .await
    }
}
