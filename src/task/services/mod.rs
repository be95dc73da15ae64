//! Application services for task management.

mod tracking;

pub use tracking::{
    CreateTaskRequest, OWNER_NOT_FOUND, TASK_NOT_FOUND, TaskService, UpdateTaskRequest,
};
