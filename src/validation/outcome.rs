//! Validation outcome and field failure types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single failed rule, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldFailure {
    key: String,
    message: String,
}

impl FieldFailure {
    /// Creates a failure for the given field key.
    #[must_use]
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Returns the field key, e.g. `Title`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Splits the failure into its key and message.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.key, self.message)
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl std::error::Error for FieldFailure {}

/// Result of evaluating an entity's rule set.
///
/// Failures keep rule evaluation order and are not deduplicated. The outcome
/// is valid exactly when no failure was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    failures: Vec<FieldFailure>,
}

impl ValidationOutcome {
    /// Creates an outcome with no failures.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Creates an outcome from failures in evaluation order.
    #[must_use]
    pub fn from_failures(failures: impl IntoIterator<Item = FieldFailure>) -> Self {
        Self {
            failures: failures.into_iter().collect(),
        }
    }

    /// Returns `true` when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the recorded failures in evaluation order.
    #[must_use]
    pub fn failures(&self) -> &[FieldFailure] {
        &self.failures
    }

    /// Returns the field keys of all failures in evaluation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(FieldFailure::key)
    }

    /// Consumes the outcome and returns its failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<FieldFailure> {
        self.failures
    }

    /// Appends the failures of another outcome after this outcome's own.
    #[must_use]
    pub fn chain(mut self, other: Self) -> Self {
        self.failures.extend(other.failures);
        self
    }
}
