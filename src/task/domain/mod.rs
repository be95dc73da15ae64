//! Domain model for tasks.
//!
//! A task belongs to exactly one user through [`Task::user_id`]. The owning
//! [`User`](crate::user::domain::User) may be attached for read convenience,
//! but the identifier stays the source of truth.

mod ids;
mod task;
mod validator;

pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskDraft};
pub use validator::{
    DESCRIPTION_KEY, DESCRIPTION_MAX_CHARS, DESCRIPTION_TOO_LONG, DUE_DATE_KEY, DUE_DATE_PAST,
    TITLE_KEY, TITLE_LENGTH, TITLE_LENGTH_BOUNDS, TITLE_REQUIRED, USER_ID_KEY, USER_ID_REQUIRED,
};
