//! Infrastructure error handling.

pub mod conversions;

pub use conversions::{api_error_from_reqwest, InfraError};
