//! Provider that discards everything.

use async_trait::async_trait;
use housewatch_core::analytics::{AnalyticsProvider, Delivery, SuppressReason};
use housewatch_domain::{AnalyticsEvent, PageViewProps, ProviderKind, Traits};

const DISCARDED: Delivery = Delivery::Suppressed(SuppressReason::Disabled);

/// Used when analytics are disabled. Produces no output of any kind.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProvider;

impl NoopProvider {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnalyticsProvider for NoopProvider {
    async fn track(&self, _event: &AnalyticsEvent) -> Delivery {
        DISCARDED
    }

    async fn identify(&self, _user_id: &str, _traits: Option<Traits>) -> Delivery {
        DISCARDED
    }

    async fn page(&self, _page_name: &str, _properties: Option<PageViewProps>) -> Delivery {
        DISCARDED
    }

    async fn flush(&self) -> Delivery {
        DISCARDED
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Noop
    }
}
