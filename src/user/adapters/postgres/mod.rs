//! `PostgreSQL` adapter for user persistence.

mod models;
mod repository;

pub(crate) use models::UserRow;
pub use repository::PostgresUserRepository;
