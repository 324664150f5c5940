//! Remote ingestion provider.
//!
//! Events are enriched with client context, queued, and posted in batches
//! through a [`RemoteTransport`]. Setup happens once per [`RemoteInit`]: a
//! missing API key degrades the provider for good, and every later
//! operation is silently dropped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use housewatch_core::analytics::{AnalyticsProvider, Delivery, SuppressReason};
use housewatch_domain::constants::{IDENTIFY_EVENT, PAGE_VIEW_EVENT};
use housewatch_domain::{AnalyticsConfig, AnalyticsEvent, PageViewProps, ProviderKind, Traits};
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::{Mutex, RwLock};
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::context::ClientContext;
use super::transport::{IngestBatch, IngestEvent, RemoteTransport};

/// Lifecycle of the remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderState {
    Uninitialized,
    Initialized,
    Degraded,
}

#[derive(Debug, Default)]
struct InitCell {
    state: OnceCell<ProviderState>,
    attempts: AtomicUsize,
}

/// Shared one-time setup guard.
///
/// Every provider holding the same handle shares one setup outcome, decided
/// by whichever provider is used first.
#[derive(Debug, Clone, Default)]
pub struct RemoteInit {
    inner: Arc<InitCell>,
}

static GLOBAL_INIT: Lazy<RemoteInit> = Lazy::new(RemoteInit::new);

impl RemoteInit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide handle.
    pub fn global() -> Self {
        GLOBAL_INIT.clone()
    }

    pub fn state(&self) -> ProviderState {
        self.inner.state.get().copied().unwrap_or(ProviderState::Uninitialized)
    }

    /// Number of setup attempts made through this handle (0 or 1).
    pub fn attempts(&self) -> usize {
        self.inner.attempts.load(Ordering::SeqCst)
    }

    fn ensure(&self, api_key: Option<&str>) -> ProviderState {
        *self.inner.state.get_or_init(|| {
            self.inner.attempts.fetch_add(1, Ordering::SeqCst);
            match api_key.map(str::trim).filter(|key| !key.is_empty()) {
                Some(_) => {
                    info!("remote analytics initialized");
                    ProviderState::Initialized
                }
                None => {
                    warn!("analytics API key is not set; remote analytics disabled");
                    ProviderState::Degraded
                }
            }
        })
    }
}

/// Settings the remote provider needs from [`AnalyticsConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub api_key: Option<String>,
    pub environment: String,
    pub flush_queue_size: usize,
}

impl From<&AnalyticsConfig> for RemoteSettings {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            environment: config.environment.to_string(),
            flush_queue_size: config.flush_queue_size.max(1),
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    user_id: Option<String>,
    /// Set-once traits, keyed by user id.
    traits: HashMap<String, Traits>,
    queue: Vec<IngestEvent>,
}

/// Provider backed by a remote ingestion service.
pub struct RemoteProvider {
    settings: RemoteSettings,
    init: RemoteInit,
    transport: Arc<dyn RemoteTransport>,
    device_id: String,
    context: RwLock<ClientContext>,
    session: Mutex<Session>,
}

impl RemoteProvider {
    /// Construction is cheap; setup runs on first use.
    pub fn new(
        settings: RemoteSettings,
        transport: Arc<dyn RemoteTransport>,
        init: RemoteInit,
    ) -> Self {
        Self {
            settings,
            init,
            transport,
            device_id: Uuid::new_v4().to_string(),
            context: RwLock::new(ClientContext::default()),
            session: Mutex::new(Session::default()),
        }
    }

    pub fn with_context(self, context: ClientContext) -> Self {
        *self.context.write() = context;
        self
    }

    pub fn state(&self) -> ProviderState {
        self.init.state()
    }

    /// Events waiting for the next flush.
    pub fn queued(&self) -> usize {
        self.session.lock().queue.len()
    }

    /// Set-once traits recorded for `user_id`.
    pub fn user_traits(&self, user_id: &str) -> Option<Traits> {
        self.session.lock().traits.get(user_id).cloned()
    }

    fn ready(&self) -> Result<(), Delivery> {
        match self.init.ensure(self.settings.api_key.as_deref()) {
            ProviderState::Initialized => Ok(()),
            ProviderState::Degraded | ProviderState::Uninitialized => {
                Err(Delivery::Suppressed(SuppressReason::Degraded))
            }
        }
    }

    /// Add context properties the caller did not set.
    fn enrich(&self, mut properties: Map<String, Value>) -> Map<String, Value> {
        let context = self.context.read();
        let mut extra = Map::new();
        extra.insert(
            "timestamp".into(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        if let Some(url) = &context.current_url {
            extra.insert("current_url".into(), Value::from(url.as_str()));
        }
        if let Some(viewport) = context.viewport_label() {
            extra.insert("viewport".into(), Value::from(viewport));
        }
        extra.insert("user_agent".into(), Value::from(context.user_agent.as_str()));
        extra.insert("environment".into(), Value::from(self.settings.environment.as_str()));

        for (key, value) in extra {
            properties.entry(key).or_insert(value);
        }
        properties
    }

    fn record(
        &self,
        event_type: &str,
        event_properties: Map<String, Value>,
        user_properties: Option<Value>,
    ) -> IngestEvent {
        IngestEvent {
            event_type: event_type.to_string(),
            user_id: self.session.lock().user_id.clone(),
            device_id: self.device_id.clone(),
            time: Utc::now().timestamp_millis(),
            insert_id: Uuid::new_v4().to_string(),
            platform: self.context.read().platform.clone(),
            event_properties,
            user_properties,
        }
    }

    async fn enqueue(&self, event: IngestEvent) -> Delivery {
        let batch = {
            let mut session = self.session.lock();
            session.queue.push(event);
            if session.queue.len() >= self.settings.flush_queue_size {
                Some(std::mem::take(&mut session.queue))
            } else {
                None
            }
        };
        match batch {
            Some(batch) => self.deliver(batch).await,
            None => Delivery::Buffered,
        }
    }

    async fn deliver(&self, events: Vec<IngestEvent>) -> Delivery {
        if events.is_empty() {
            return Delivery::Delivered;
        }
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Delivery::Suppressed(SuppressReason::Degraded);
        };
        match self.transport.send(IngestBatch { api_key, events: &events }).await {
            Ok(()) => Delivery::Delivered,
            Err(err) => {
                error!(error = %err, dropped = events.len(), "analytics batch delivery failed");
                Delivery::Suppressed(SuppressReason::Transport)
            }
        }
    }
}

#[async_trait]
impl AnalyticsProvider for RemoteProvider {
    async fn track(&self, event: &AnalyticsEvent) -> Delivery {
        if let Err(suppressed) = self.ready() {
            return suppressed;
        }
        let properties = self.enrich(event.properties());
        let record = self.record(event.name(), properties, None);
        self.enqueue(record).await
    }

    async fn identify(&self, user_id: &str, traits: Option<Traits>) -> Delivery {
        if let Err(suppressed) = self.ready() {
            return suppressed;
        }
        {
            let mut session = self.session.lock();
            session.user_id = Some(user_id.to_string());
            let known = session.traits.entry(user_id.to_string()).or_default();
            for (key, value) in traits.iter().flatten() {
                known.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        debug!(%user_id, "user identified");

        let user_properties = traits.map(|traits| json!({ "$setOnce": traits }));
        let record = self.record(IDENTIFY_EVENT, Map::new(), user_properties);
        self.enqueue(record).await
    }

    async fn page(&self, page_name: &str, properties: Option<PageViewProps>) -> Delivery {
        if let Err(suppressed) = self.ready() {
            return suppressed;
        }
        let properties = properties.unwrap_or_else(|| PageViewProps {
            page_name: page_name.to_string(),
            path: None,
        });
        if let Some(path) = &properties.path {
            self.context.write().current_url = Some(path.clone());
        }
        let properties = AnalyticsEvent::PageView(properties).properties();
        let record = self.record(PAGE_VIEW_EVENT, self.enrich(properties), None);
        self.enqueue(record).await
    }

    async fn flush(&self) -> Delivery {
        if let Err(suppressed) = self.ready() {
            return suppressed;
        }
        let batch = std::mem::take(&mut self.session.lock().queue);
        self.deliver(batch).await
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Remote
    }
}
