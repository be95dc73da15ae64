//! Persistence contracts shared by every bounded context.
//!
//! Services talk to storage through the generic [`Repository`] port and a
//! [`UnitOfWork`] that commits all staged writes of one business operation at
//! once. Two adapter families are provided:
//!
//! - [`memory`]: thread-safe in-memory tables for tests and embedding
//! - [`postgres`]: Diesel-backed `PostgreSQL` session

pub mod memory;
mod page;
mod ports;
pub mod postgres;

pub use page::PageRequest;
pub use ports::{
    Entity, PersistenceError, PersistenceResult, Predicate, Repository, ServiceResult, UnitOfWork,
};

#[cfg(test)]
pub use ports::MockUnitOfWork;
