//! Delivery of batched events to the ingestion endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use housewatch_core::{HttpRequest, HttpTransport};
use housewatch_domain::HouseWatchError;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::http::HttpClient;

/// One ingestion record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestEvent {
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub device_id: String,
    /// Milliseconds since the Unix epoch.
    pub time: i64,
    pub insert_id: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub event_properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_properties: Option<Value>,
}

/// Request body posted to the ingestion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IngestBatch<'a> {
    pub api_key: &'a str,
    pub events: &'a [IngestEvent],
}

/// Sends batches on behalf of the remote provider.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    async fn send(&self, batch: IngestBatch<'_>) -> Result<(), HouseWatchError>;
}

/// JSON-over-HTTP ingestion, posting each batch to a fixed URL.
pub struct HttpIngestionTransport {
    http: Arc<dyn HttpTransport>,
}

impl HttpIngestionTransport {
    /// Transport posting to `server_url` with the default client settings.
    pub fn new(server_url: &str) -> Result<Self, HouseWatchError> {
        let client = HttpClient::builder().base_url(server_url).build()?;
        Ok(Self::with_transport(Arc::new(client)))
    }

    /// Reuse an existing transport whose base URL is the ingestion endpoint.
    pub fn with_transport(http: Arc<dyn HttpTransport>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RemoteTransport for HttpIngestionTransport {
    async fn send(&self, batch: IngestBatch<'_>) -> Result<(), HouseWatchError> {
        let count = batch.events.len();
        let body = serde_json::to_value(&batch)
            .map_err(|err| HouseWatchError::Internal(format!("encode batch: {err}")))?;
        self.http.send(HttpRequest::post("", body)).await?;
        debug!(count, "analytics batch delivered");
        Ok(())
    }
}
