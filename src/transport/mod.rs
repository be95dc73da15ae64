//! Mapping of operation results to transport outcomes.
//!
//! The service layer knows nothing about transports. A transport adapter
//! feeds each [`OperationResult`](crate::envelope::OperationResult) through one
//! of the [`mapper`] functions and gets back a [`TransportOutcome`]: a status
//! classification plus an optional JSON-serialisable [`ResponseBody`].
//! Presentation shapes for users and tasks live in [`dto`], and [`respond`]
//! turns collaborator failures into a generic 500 outcome.
//!
//! # Examples
//!
//! ```
//! use taskboard::envelope::{OperationResult, StatusClass};
//! use taskboard::transport::{TransportOutcome, mapper};
//!
//! let failed: OperationResult<u32> = OperationResult::not_found("user not found");
//! let outcome = mapper::to_outcome(failed);
//! assert_eq!(outcome.status(), StatusClass::NOT_FOUND);
//!
//! let created = mapper::to_created(OperationResult::success(7_u32), |id| format!("/items/{id}"));
//! assert!(matches!(created, TransportOutcome::Created { ref location, .. } if location == "/items/7"));
//! ```

mod boundary;
pub mod dto;
pub mod mapper;
mod outcome;

pub use boundary::{INTERNAL_ERROR_MESSAGE, collaborator_failure, respond};
pub use outcome::{ResponseBody, TransportOutcome};
