//! Pure functions turning envelopes into transport outcomes.
//!
//! Every function maps a failed envelope the same way: the outcome status is
//! the first error's status and the body lists all errors. Value mappers and
//! location builders are never called for failed envelopes.
//!
//! Envelopes whose payload is optional should go through
//! [`OperationResult::require_value`] first, which turns a missing payload
//! into a 500-class error keyed `Data`.

use super::{ResponseBody, TransportOutcome};
use crate::envelope::OperationResult;

/// Maps an envelope to `Ok` or an error outcome.
#[must_use]
pub fn to_outcome<T>(result: OperationResult<T>) -> TransportOutcome<T> {
    match result {
        OperationResult::Success(value) => TransportOutcome::Ok(ResponseBody::success(value)),
        OperationResult::Failure(errors) => TransportOutcome::from_errors(errors),
    }
}

/// Maps an envelope after applying a presentation transform to its value.
#[must_use]
pub fn to_outcome_with<T, U>(
    result: OperationResult<T>,
    mapper: impl FnOnce(T) -> U,
) -> TransportOutcome<U> {
    to_outcome(result.map(mapper))
}

/// Maps a collection envelope, transforming every element.
#[must_use]
pub fn to_outcome_each<T, U>(
    result: OperationResult<Vec<T>>,
    mapper: impl FnMut(T) -> U,
) -> TransportOutcome<Vec<U>> {
    to_outcome(result.map_each(mapper))
}

/// Maps an envelope to `Created`, deriving the location from the value.
#[must_use]
pub fn to_created<T>(
    result: OperationResult<T>,
    location: impl FnOnce(&T) -> String,
) -> TransportOutcome<T> {
    match result {
        OperationResult::Success(value) => TransportOutcome::Created {
            location: location(&value),
            body: ResponseBody::success(value),
        },
        OperationResult::Failure(errors) => TransportOutcome::from_errors(errors),
    }
}

/// Maps an envelope to `Created` after transforming its value; the location
/// is derived from the transformed value.
#[must_use]
pub fn to_created_with<T, U>(
    result: OperationResult<T>,
    mapper: impl FnOnce(T) -> U,
    location: impl FnOnce(&U) -> String,
) -> TransportOutcome<U> {
    to_created(result.map(mapper), location)
}

/// Maps an envelope to `NoContent`, discarding any success value.
#[must_use]
pub fn to_no_content<T>(result: OperationResult<T>) -> TransportOutcome<T> {
    match result {
        OperationResult::Success(_) => TransportOutcome::NoContent,
        OperationResult::Failure(errors) => TransportOutcome::from_errors(errors),
    }
}
