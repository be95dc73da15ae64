//! The generic success-or-errors envelope.

use super::{ApiError, ErrorList, StatusClass};
use crate::validation::ValidationOutcome;

/// Result of a business operation.
///
/// A success always carries its value and a failure always carries at least
/// one error, so an envelope can never hold both or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum OperationResult<T> {
    /// The operation succeeded with a value.
    Success(T),
    /// The operation failed with classified errors in insertion order.
    Failure(ErrorList),
}

impl<T> OperationResult<T> {
    /// Creates a successful envelope.
    pub const fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Creates a failed envelope from a non-empty error list.
    pub const fn failure(errors: ErrorList) -> Self {
        Self::Failure(errors)
    }

    /// Creates a failed envelope from an invalid validation outcome using the
    /// 400 status class.
    ///
    /// Returns `None` when the outcome is valid, as there is nothing to
    /// report.
    #[must_use]
    pub fn from_validation(outcome: ValidationOutcome) -> Option<Self> {
        Self::from_validation_with_status(outcome, StatusClass::BAD_REQUEST)
    }

    /// Creates a failed envelope from a validation outcome, classifying every
    /// failure with `status`. Error order matches rule evaluation order.
    #[must_use]
    pub fn from_validation_with_status(
        outcome: ValidationOutcome,
        status: StatusClass,
    ) -> Option<Self> {
        let errors = outcome
            .into_failures()
            .into_iter()
            .map(|failure| ApiError::from_failure(failure, status));
        ErrorList::from_errors(errors).map(Self::Failure)
    }

    /// Creates a single-error 404 envelope keyed `id`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Failure(ErrorList::single(ApiError::not_found(message)))
    }

    /// Creates a single-error 404 envelope with a custom key.
    pub fn not_found_keyed(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::error(StatusClass::NOT_FOUND, message, key)
    }

    /// Creates a single-error envelope with an explicit classification.
    pub fn error(status: StatusClass, message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Failure(ErrorList::single(ApiError::new(status, message, key)))
    }

    /// Returns `true` when the envelope carries a value.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the success value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the errors, if any.
    #[must_use]
    pub const fn errors(&self) -> Option<&ErrorList> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }

    /// Returns the error that drives the transport status.
    #[must_use]
    pub const fn first_error(&self) -> Option<&ApiError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors.first()),
        }
    }

    /// Consumes the envelope and returns the success value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Consumes the envelope and returns its errors, if any.
    #[must_use]
    pub fn into_errors(self) -> Option<ErrorList> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }

    /// Consumes the envelope into a standard [`Result`].
    ///
    /// # Errors
    ///
    /// Returns the error list when the envelope is a failure.
    pub fn into_result(self) -> Result<T, ErrorList> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(errors) => Err(errors),
        }
    }

    /// Transforms the success value; failures pass through untouched and the
    /// mapper is not called.
    pub fn map<U>(self, mapper: impl FnOnce(T) -> U) -> OperationResult<U> {
        match self {
            Self::Success(value) => OperationResult::Success(mapper(value)),
            Self::Failure(errors) => OperationResult::Failure(errors),
        }
    }
}

impl<T> OperationResult<Vec<T>> {
    /// Transforms every element of a collection payload.
    pub fn map_each<U>(self, mapper: impl FnMut(T) -> U) -> OperationResult<Vec<U>> {
        self.map(|items| items.into_iter().map(mapper).collect())
    }
}

impl<T> OperationResult<Option<T>> {
    /// Requires an optional payload to be present.
    ///
    /// A success carrying `None` becomes a 500-class failure keyed `Data`;
    /// this should be unreachable in practice and signals a bug upstream.
    pub fn require_value(self) -> OperationResult<T> {
        match self {
            Self::Success(Some(value)) => OperationResult::Success(value),
            Self::Success(None) => {
                OperationResult::Failure(ErrorList::single(ApiError::unexpected_null()))
            }
            Self::Failure(errors) => OperationResult::Failure(errors),
        }
    }
}

impl<T> From<ErrorList> for OperationResult<T> {
    fn from(errors: ErrorList) -> Self {
        Self::Failure(errors)
    }
}

impl<T> From<Result<T, ErrorList>> for OperationResult<T> {
    fn from(result: Result<T, ErrorList>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(errors) => Self::Failure(errors),
        }
    }
}
