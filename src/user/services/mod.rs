//! Application services for user management.

mod registry;

pub use registry::{
    CreateUserRequest, EMAIL_TAKEN, USER_NOT_FOUND, UpdateUserRequest, UserService,
};
