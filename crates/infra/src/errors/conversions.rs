//! Conversions from external infrastructure errors into domain errors.

use housewatch_domain::{ApiError, HouseWatchError};
use reqwest::Error as HttpError;
use thiserror::Error;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InfraError(pub HouseWatchError);

impl From<InfraError> for HouseWatchError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HouseWatchError> for InfraError {
    fn from(value: HouseWatchError) -> Self {
        Self(value)
    }
}

pub(crate) const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiError */
/* -------------------------------------------------------------------------- */

/// Normalize a transport failure. Status-bearing failures are handled by the
/// client before this point, so anything left here carries no status.
pub fn api_error_from_reqwest(err: &HttpError) -> ApiError {
    if err.is_timeout() {
        return ApiError::timeout();
    }

    #[cfg(not(target_arch = "wasm32"))]
    if err.is_connect() {
        return ApiError::network(NETWORK_ERROR_MESSAGE);
    }

    if err.is_decode() {
        return ApiError::decode(format!("Invalid response body: {err}"));
    }

    if err.is_builder() {
        return ApiError::unknown(format!("Malformed request: {err}"));
    }

    if let Some(status) = err.status() {
        let code = status.as_u16();
        return ApiError::server(
            code,
            format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status")),
        );
    }

    ApiError::network(NETWORK_ERROR_MESSAGE)
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        if value.is_builder() {
            return Self(HouseWatchError::Config(format!("invalid HTTP client setup: {value}")));
        }
        Self(HouseWatchError::Api(api_error_from_reqwest(&value)))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(HouseWatchError::Config(format!("Invalid TOML format: {value}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(HouseWatchError::Config(format!("Invalid JSON format: {value}")))
    }
}
