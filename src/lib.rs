//! Taskboard: users, tasks and a uniform operation result envelope.
//!
//! Every service operation returns an [`envelope::OperationResult`] that
//! either carries a value or an ordered list of classified errors. Transport
//! adapters turn envelopes into responses through [`transport`] without the
//! services knowing which transport is in use.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Entities and their rule sets, free of infrastructure
//! - **Ports**: Repository and unit-of-work traits
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration returning envelopes
//!
//! # Modules
//!
//! - [`validation`]: Field failures, outcomes and reusable rules
//! - [`envelope`]: Operation results, errors and status classes
//! - [`persistence`]: Repository contracts, unit of work and pagination
//! - [`user`]: User management
//! - [`task`]: Task tracking
//! - [`transport`]: Mapping envelopes to transport outcomes
//! - [`config`]: Service configuration

pub mod config;
pub mod envelope;
pub mod persistence;
pub mod task;
pub mod transport;
pub mod user;
pub mod validation;

#[cfg(test)]
mod test_support;
