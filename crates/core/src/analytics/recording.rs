//! In-memory analytics provider.
//!
//! Keeps every call it receives, in order. Useful wherever a test or an
//! embedding application needs to inspect what would have been sent.

use std::sync::Arc;

use async_trait::async_trait;
use housewatch_domain::constants::PAGE_VIEW_EVENT;
use housewatch_domain::{AnalyticsEvent, PageViewProps, ProviderKind, Traits};
use parking_lot::Mutex;
use serde_json::{Map, Value};

use super::ports::{AnalyticsProvider, Delivery};

/// One call received by a [`RecordingProvider`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Track { name: &'static str, properties: Map<String, Value> },
    Identify { user_id: String, traits: Option<Traits> },
    Page { name: String, properties: Option<PageViewProps> },
    Flush,
}

impl RecordedCall {
    /// Event name for track/page calls.
    pub fn event_name(&self) -> Option<&str> {
        match self {
            Self::Track { name, .. } => Some(*name),
            Self::Page { .. } => Some(PAGE_VIEW_EVENT),
            Self::Identify { .. } | Self::Flush => None,
        }
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Track { properties, .. } => Some(properties),
            _ => None,
        }
    }
}

/// Provider that appends every call to a shared journal.
#[derive(Debug, Default, Clone)]
pub struct RecordingProvider {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Names of tracked events (track and page calls), in order.
    pub fn event_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| call.event_name().map(str::to_string))
            .collect()
    }

    /// Properties of the most recent tracked event with the given name.
    pub fn last_properties(&self, name: &str) -> Option<Map<String, Value>> {
        self.calls
            .lock()
            .iter()
            .rev()
            .find(|call| call.event_name() == Some(name))
            .and_then(|call| call.properties().cloned())
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn push(&self, call: RecordedCall) -> Delivery {
        self.calls.lock().push(call);
        Delivery::Delivered
    }
}

#[async_trait]
impl AnalyticsProvider for RecordingProvider {
    async fn track(&self, event: &AnalyticsEvent) -> Delivery {
        self.push(RecordedCall::Track { name: event.name(), properties: event.properties() })
    }

    async fn identify(&self, user_id: &str, traits: Option<Traits>) -> Delivery {
        self.push(RecordedCall::Identify { user_id: user_id.to_string(), traits })
    }

    async fn page(&self, page_name: &str, properties: Option<PageViewProps>) -> Delivery {
        self.push(RecordedCall::Page { name: page_name.to_string(), properties })
    }

    async fn flush(&self) -> Delivery {
        self.push(RecordedCall::Flush)
    }

    // Reports itself as the local backend.
    fn kind(&self) -> ProviderKind {
        ProviderKind::Console
    }
}
