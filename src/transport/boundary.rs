//! Boundary handling for collaborator failures.

use super::{TransportOutcome, mapper};
use crate::envelope::{ApiError, ErrorList, StatusClass};
use crate::persistence::{PersistenceError, ServiceResult};
use tracing::error;

/// Message sent to clients when a collaborator fails.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Converts a collaborator failure into a generic 500 outcome.
///
/// The failure is logged; its details are not exposed to the client.
#[must_use]
pub fn collaborator_failure<T>(err: &PersistenceError) -> TransportOutcome<T> {
    error!(error = %err, "collaborator failure reached the transport boundary");
    TransportOutcome::from_errors(ErrorList::single(ApiError::new(
        StatusClass::INTERNAL_ERROR,
        INTERNAL_ERROR_MESSAGE,
        "",
    )))
}

/// Maps a service result: envelopes through [`mapper::to_outcome`],
/// collaborator failures through [`collaborator_failure`].
#[must_use]
pub fn respond<T>(result: ServiceResult<T>) -> TransportOutcome<T> {
    match result {
        Ok(envelope) => mapper::to_outcome(envelope),
        Err(err) => collaborator_failure(&err),
    }
}
