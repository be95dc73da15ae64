//! Declarative field validation shared by every entity.
//!
//! Entities implement [`Validate`] by running an ordered list of rule
//! functions from [`rules`] against their current field values. Every failed
//! rule contributes one [`FieldFailure`] and the collected failures form an
//! immutable [`ValidationOutcome`].
//!
//! Validation is pull-based: calling [`Validate::validate`] twice without an
//! intervening mutation yields equal outcomes.

mod outcome;
pub mod rules;

pub use outcome::{FieldFailure, ValidationOutcome};

/// Capability implemented by self-validating entities.
pub trait Validate {
    /// Evaluates the entity's rule set against its current state.
    fn validate(&self) -> ValidationOutcome;
}
