//! In-memory `HttpTransport` stub.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use housewatch_core::{HttpRequest, HttpTransport};
use housewatch_domain::ApiError;
use parking_lot::Mutex;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Replays queued responses in order and records every request path.
///
/// A request whose options carry a cancellation token waits until the
/// token fires and then fails the way a real transport would.
#[derive(Default, Clone)]
pub struct StubTransport {
    responses: Arc<Mutex<VecDeque<Result<Value, ApiError>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, result: Result<Value, ApiError>) -> Self {
        self.responses.lock().push_back(result);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        self.requests.lock().push(request.path.clone());
        if let Some(token) = request.options.cancel.as_ref().map(CancellationToken::clone) {
            token.cancelled().await;
            return Err(ApiError::cancelled());
        }
        self.responses.lock().pop_front().unwrap_or(Ok(Value::Null))
    }
}
