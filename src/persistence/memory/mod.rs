//! In-memory persistence adapters.
//!
//! Each entity type lives in an [`InMemoryTable`]. Repositories stage writes
//! on their table and an [`InMemoryUnitOfWork`] registered with the same
//! tables applies every staged write on commit. Readers only observe
//! committed rows.

mod database;
mod table;
mod unit_of_work;

pub use database::InMemoryDatabase;
pub use table::{InMemoryTable, UniqueKey};
pub use unit_of_work::InMemoryUnitOfWork;
