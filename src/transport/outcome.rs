//! Transport outcome and response body types.

use crate::envelope::{ApiError, ErrorList, StatusClass};
use serde::Serialize;

/// JSON body returned to transport clients.
///
/// Successful bodies carry `data` and an empty `errors` list; failed bodies
/// carry no `data` and every error in envelope order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseBody<T> {
    data: Option<T>,
    errors: Vec<ApiError>,
}

impl<T> ResponseBody<T> {
    /// Creates a successful body.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Creates a failed body.
    #[must_use]
    pub fn failure(errors: ErrorList) -> Self {
        Self {
            data: None,
            errors: errors.into_vec(),
        }
    }

    /// Returns the payload, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Returns the errors in envelope order.
    #[must_use]
    pub fn errors(&self) -> &[ApiError] {
        &self.errors
    }
}

/// Transport-level rendering of an operation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome<T> {
    /// Success with a body.
    Ok(ResponseBody<T>),
    /// A resource was created at `location`.
    Created {
        /// Reference to the created resource.
        location: String,
        /// Body describing the created resource.
        body: ResponseBody<T>,
    },
    /// Success without a body.
    NoContent,
    /// Failure classified by the first error of the envelope.
    Error {
        /// Status of the first error, verbatim.
        status: StatusClass,
        /// Body listing every error.
        body: ResponseBody<T>,
    },
}

impl<T> TransportOutcome<T> {
    /// Builds the failure outcome for an error list.
    ///
    /// Only the first error drives the status.
    #[must_use]
    pub fn from_errors(errors: ErrorList) -> Self {
        Self::Error {
            status: errors.first().status(),
            body: ResponseBody::failure(errors),
        }
    }

    /// Returns the status classification of this outcome.
    #[must_use]
    pub const fn status(&self) -> StatusClass {
        match self {
            Self::Ok(_) => StatusClass::OK,
            Self::Created { .. } => StatusClass::CREATED,
            Self::NoContent => StatusClass::NO_CONTENT,
            Self::Error { status, .. } => *status,
        }
    }

    /// Returns the body, if the outcome has one.
    #[must_use]
    pub const fn body(&self) -> Option<&ResponseBody<T>> {
        match self {
            Self::Ok(body) | Self::Created { body, .. } | Self::Error { body, .. } => Some(body),
            Self::NoContent => None,
        }
    }
}
