//! Numeric status classification carried by envelope errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status classification reusing HTTP status numbering.
///
/// Values are carried verbatim to the transport; nothing renumbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusClass(u16);

impl StatusClass {
    /// Successful operation with a body.
    pub const OK: Self = Self(200);
    /// Resource created.
    pub const CREATED: Self = Self(201);
    /// Successful operation without a body.
    pub const NO_CONTENT: Self = Self(204);
    /// Invalid input or business-rule conflict.
    pub const BAD_REQUEST: Self = Self(400);
    /// Target entity absent.
    pub const NOT_FOUND: Self = Self(404);
    /// Unexpected failure, including unexpectedly absent payloads.
    pub const INTERNAL_ERROR: Self = Self(500);

    /// Wraps an arbitrary numeric classification.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Returns `true` for codes in the 2xx range.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }
}

impl From<StatusClass> for u16 {
    fn from(status: StatusClass) -> Self {
        status.0
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
