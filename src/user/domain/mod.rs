//! Domain model for users.

mod email;
mod ids;
mod user;
mod validator;

pub use email::Email;
pub use ids::UserId;
pub use user::{PersistedUserData, User};
pub use validator::{
    EMAIL_INVALID, EMAIL_KEY, EMAIL_MAX_CHARS, EMAIL_TOO_LONG, NAME_KEY, NAME_LENGTH,
    NAME_LENGTH_BOUNDS, NAME_REQUIRED,
};
