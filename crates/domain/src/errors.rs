//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    CODE_DECODE_ERROR, CODE_NETWORK_ERROR, CODE_REQUEST_CANCELLED, CODE_TIMEOUT_ERROR,
    CODE_UNKNOWN_ERROR, CODE_VALIDATION_ERROR,
};

/// Main error type for HouseWatch
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum HouseWatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type alias for HouseWatch operations
pub type Result<T> = std::result::Result<T, HouseWatchError>;

/// Failure category of a normalized [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Caller input was rejected before any I/O.
    Validation,
    /// Connection could not be established, or the request was cancelled.
    Network,
    /// The transport's time budget ran out.
    Timeout,
    /// The remote answered with a non-success status.
    Server,
    /// Anything else (malformed request, undecodable body).
    Unknown,
}

crate::impl_domain_status_conversions!(ApiErrorKind {
    Validation => "validation",
    Network => "network",
    Timeout => "timeout",
    Server => "server",
    Unknown => "unknown",
});

/// Transport-independent error shape handed to every caller of the houses
/// API. Never exposes reqwest (or any other transport) error types.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>, code: &str) -> Self {
        Self { kind, message: message.into(), status: None, code: Some(code.to_string()) }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message, CODE_VALIDATION_ERROR)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message, CODE_NETWORK_ERROR)
    }

    /// Cancellation is reported as a network-style failure with its own code.
    pub fn cancelled() -> Self {
        Self::new(ApiErrorKind::Network, "Request was cancelled.", CODE_REQUEST_CANCELLED)
    }

    pub fn timeout() -> Self {
        Self::new(ApiErrorKind::Timeout, "Request timeout. Please try again.", CODE_TIMEOUT_ERROR)
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Server,
            message: message.into(),
            status: Some(status),
            code: Some(format!("HTTP_{status}")),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message, CODE_DECODE_ERROR)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message, CODE_UNKNOWN_ERROR)
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ApiErrorKind::Validation
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl From<HouseWatchError> for ApiError {
    fn from(value: HouseWatchError) -> Self {
        match value {
            HouseWatchError::Api(err) => err,
            other => Self::unknown(other.to_string()),
        }
    }
}
