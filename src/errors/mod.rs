//! Error taxonomy for the request path.
//!
//! Failures are parsed into [`failure::Failure`] where they first enter the
//! service and folded into one [`normalized::NormalizedError`] envelope by
//! [`normalizer::normalize`] before crossing the HTTP boundary.

pub mod failure;
pub mod normalized;
pub mod normalizer;
pub mod status;

pub use failure::Failure;
pub use normalized::{ErrorDetail, ErrorKind, NormalizedError, ValidationIssue};
pub use normalizer::{normalize, normalize_value, ErrorContext};
