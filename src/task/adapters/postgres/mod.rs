//! `PostgreSQL` adapter for task persistence.

mod models;
mod repository;

pub use repository::PostgresTaskRepository;
