//! Step definitions for operation result scenarios.

pub mod world;

mod given;
mod then;
mod when;
