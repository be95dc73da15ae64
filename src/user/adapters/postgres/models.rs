//! Diesel row models for user persistence.

use crate::persistence::postgres::schema::users;
use crate::user::domain::{Email, PersistedUserData, User, UserId};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset for mutable user columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self::from_persisted(PersistedUserData {
            id: UserId::from_uuid(row.id),
            name: row.name,
            email: Email::new(row.email),
            created_at: row.created_at,
        })
    }
}

impl From<&User> for NewUserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

impl From<&User> for UserChangeset {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_owned(),
            email: user.email().as_str().to_owned(),
        }
    }
}
