//! Diesel-backed `PostgreSQL` persistence session.
//!
//! A [`PgSession`] is shared by the `PostgreSQL` repositories of one logical
//! operation. Reads run immediately against the pool; writes are staged as
//! closures and executed inside a single database transaction when the
//! session commits. Each operation starts its own session with
//! [`PgSession::begin`].

pub(crate) mod schema;
mod session;

pub use session::{PgPool, PgSession};
pub(crate) use session::map_diesel_error;
