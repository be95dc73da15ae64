//! Transport-agnostic operation result envelope.
//!
//! Every service operation returns an [`OperationResult`]: either a success
//! value or a non-empty [`ErrorList`]. Each [`ApiError`] carries a
//! [`StatusClass`] that reuses HTTP numbering as a lingua franca, so adapters
//! can map envelopes to any transport without the service layer knowing about
//! it.

mod error;
mod result;
mod status;

pub use error::{ApiError, ErrorList};
pub use result::OperationResult;
pub use status::StatusClass;
