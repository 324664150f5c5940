//! HTTP transport port.
//!
//! The houses service talks to the upstream REST API only through
//! [`HttpTransport`], so it never sees transport-library error types: every
//! failure arrives already normalized as an [`ApiError`].
//!
//! # Example
//!
//! ```no_run
//! use housewatch_core::{HttpRequest, HttpTransport, RequestOptions};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn fetch(transport: &impl HttpTransport) {
//!     let cancel = CancellationToken::new();
//!     let request = HttpRequest::get("/Houses")
//!         .with_options(RequestOptions::default().with_cancellation(cancel.clone()));
//!     let _ = transport.send(request).await;
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use housewatch_domain::ApiError;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// HTTP verbs supported by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options: extra headers and an external cancellation signal.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: BTreeMap<String, String>,
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Request envelope handed to an [`HttpTransport`].
///
/// `path` is relative to the transport's base URL.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub options: RequestOptions,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: None, options: RequestOptions::default() }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// Transport contract: send a request, get decoded JSON or a normalized error.
///
/// A 2xx response without a JSON body decodes to `Value::Null`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<Value, ApiError>;
}
