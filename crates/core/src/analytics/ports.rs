//! Port interface for analytics backends
//!
//! Every backend (no-op, console, remote SDK) implements
//! [`AnalyticsProvider`]. Tracking is best-effort: operations never fail from
//! the caller's point of view, they only report a [`Delivery`] outcome that
//! callers are free to ignore.

use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use housewatch_domain::{AnalyticsEvent, PageViewProps, ProviderKind, Traits};

/// Why a provider dropped an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuppressReason {
    /// Tracking is switched off for this provider.
    Disabled,
    /// The provider failed its one-time setup and stays silent.
    Degraded,
    /// Handing the payload to the transport failed.
    Transport,
}

impl Display for SuppressReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Disabled => "disabled",
            Self::Degraded => "degraded",
            Self::Transport => "transport",
        })
    }
}

/// Outcome of a single provider operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delivery {
    /// Emitted or sent immediately.
    Delivered,
    /// Accepted into a buffer for later delivery.
    Buffered,
    /// Dropped without side effects visible to the caller.
    Suppressed(SuppressReason),
}

impl Delivery {
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppressed(_))
    }
}

/// Analytics backend contract.
///
/// Implementations must catch and log their own failures; nothing may
/// propagate (or panic) past these methods.
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    /// Record a discrete event. Returns once the event is accepted.
    async fn track(&self, event: &AnalyticsEvent) -> Delivery;

    /// Attach the session to a durable user id and optional traits.
    async fn identify(&self, user_id: &str, traits: Option<Traits>) -> Delivery;

    /// Record a page view under the reserved `PageView` event name.
    async fn page(&self, page_name: &str, properties: Option<PageViewProps>) -> Delivery;

    /// Attempt delivery of anything buffered.
    async fn flush(&self) -> Delivery;

    /// Backend this provider stands for.
    fn kind(&self) -> ProviderKind;
}
