//! In-memory user repository.

mod user;

pub use user::{InMemoryUserRepository, USERS_EMAIL_KEY};
