//! Envelope error entries and the non-empty error list.

use super::StatusClass;
use crate::validation::FieldFailure;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Message used when a success payload is unexpectedly absent.
pub(crate) const UNEXPECTED_NULL_MESSAGE: &str = "response data was unexpectedly null";

/// Key attached to the unexpected-null error.
pub(crate) const UNEXPECTED_NULL_KEY: &str = "Data";

/// A single classified error carried by a failed envelope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    status_code: StatusClass,
    message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    key: String,
}

impl ApiError {
    /// Creates an error; an empty `key` means the error is not field-bound.
    #[must_use]
    pub fn new(status: StatusClass, message: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            status_code: status,
            message: message.into(),
            key: key.into(),
        }
    }

    /// Creates a 404-class error keyed `id`.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusClass::NOT_FOUND, message, "id")
    }

    /// Creates the 500-class error raised when a success payload is absent.
    #[must_use]
    pub fn unexpected_null() -> Self {
        Self::new(
            StatusClass::INTERNAL_ERROR,
            UNEXPECTED_NULL_MESSAGE,
            UNEXPECTED_NULL_KEY,
        )
    }

    /// Converts a validation failure using the given status.
    #[must_use]
    pub fn from_failure(failure: FieldFailure, status: StatusClass) -> Self {
        let (key, message) = failure.into_parts();
        Self::new(status, message, key)
    }

    /// Returns the status classification.
    #[must_use]
    pub const fn status(&self) -> StatusClass {
        self.status_code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending field name, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        Some(self.key.as_str()).filter(|key| !key.is_empty())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "[{}] {key}: {}", self.status_code, self.message),
            None => write!(f, "[{}] {}", self.status_code, self.message),
        }
    }
}

/// Ordered, non-empty list of envelope errors.
///
/// The first error drives the transport status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList {
    first: ApiError,
    rest: Vec<ApiError>,
}

impl ErrorList {
    /// Creates a list holding a single error.
    #[must_use]
    pub const fn single(error: ApiError) -> Self {
        Self {
            first: error,
            rest: Vec::new(),
        }
    }

    /// Creates a list from errors in insertion order.
    ///
    /// Returns `None` when `errors` yields nothing.
    pub fn from_errors(errors: impl IntoIterator<Item = ApiError>) -> Option<Self> {
        let mut iter = errors.into_iter();
        let first = iter.next()?;
        Some(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// Appends an error after the existing ones.
    pub fn push(&mut self, error: ApiError) {
        self.rest.push(error);
    }

    /// Returns the first error.
    #[must_use]
    pub const fn first(&self) -> &ApiError {
        &self.first
    }

    /// Returns the number of errors, always at least one.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rest.len() + 1
    }

    /// Iterates the errors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ApiError> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Returns the errors as a vector in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<ApiError> {
        let mut errors = Vec::with_capacity(self.rest.len() + 1);
        errors.push(self.first);
        errors.extend(self.rest);
        errors
    }
}

impl IntoIterator for ErrorList {
    type Item = ApiError;
    type IntoIter = std::vec::IntoIter<ApiError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl From<ApiError> for ErrorList {
    fn from(error: ApiError) -> Self {
        Self::single(error)
    }
}

impl Serialize for ErrorList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
