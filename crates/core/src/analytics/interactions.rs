//! User interaction tracking helpers.

use std::sync::Arc;
use std::time::Instant;

use housewatch_domain::analytics::{
    ButtonClickedProps, ErrorOccurredProps, FeatureUsedProps, FilterAppliedProps,
    HouseCardHoveredProps, SearchPerformedProps, TraitClickedProps,
};
use housewatch_domain::{AnalyticsEvent, Traits};
use tracing::trace;

use super::ports::{AnalyticsProvider, Delivery};

/// Typed entry points for the interactions a catalog UI reports.
#[derive(Clone)]
pub struct InteractionTracker {
    analytics: Arc<dyn AnalyticsProvider>,
}

impl InteractionTracker {
    pub fn new(analytics: Arc<dyn AnalyticsProvider>) -> Self {
        Self { analytics }
    }

    /// Track any schema event.
    pub async fn track(&self, event: impl Into<AnalyticsEvent>) -> Delivery {
        let event = event.into();
        trace!(event = event.name(), "interaction tracked");
        self.analytics.track(&event).await
    }

    pub async fn track_button_click(&self, id: &str, label: Option<&str>) -> Delivery {
        self.track(ButtonClickedProps { id: id.to_string(), label: label.map(str::to_string) })
            .await
    }

    pub async fn track_trait_click(
        &self,
        trait_name: &str,
        house_id: Option<&str>,
        house_name: Option<&str>,
    ) -> Delivery {
        self.track(TraitClickedProps {
            trait_name: trait_name.to_string(),
            house_id: house_id.map(str::to_string),
            house_name: house_name.map(str::to_string),
        })
        .await
    }

    /// Start timing a hover over a house card. Nothing is emitted until the
    /// returned handle is finished.
    pub fn start_card_hover(&self, house_id: &str, house_name: Option<&str>) -> HoverHandle {
        HoverHandle {
            analytics: Arc::clone(&self.analytics),
            house_id: house_id.to_string(),
            house_name: house_name.map(str::to_string),
            started_at: Instant::now(),
        }
    }

    pub async fn track_error(
        &self,
        error_type: &str,
        error_message: &str,
        page_name: Option<&str>,
        stack_trace: Option<&str>,
    ) -> Delivery {
        self.track(ErrorOccurredProps {
            error_type: error_type.to_string(),
            error_message: error_message.to_string(),
            page_name: page_name.map(str::to_string),
            stack_trace: stack_trace.map(str::to_string),
        })
        .await
    }

    pub async fn track_feature_usage(&self, feature_name: &str, context: Option<&str>) -> Delivery {
        self.track(FeatureUsedProps {
            feature_name: feature_name.to_string(),
            usage_context: context.map(str::to_string),
        })
        .await
    }

    pub async fn track_search(&self, query: &str, results_count: Option<usize>) -> Delivery {
        self.track(SearchPerformedProps { query: query.to_string(), results_count }).await
    }

    pub async fn track_filter(&self, filter_type: &str, filter_value: &str) -> Delivery {
        self.track(FilterAppliedProps {
            filter_type: filter_type.to_string(),
            filter_value: filter_value.to_string(),
        })
        .await
    }

    pub async fn identify_user(&self, user_id: &str, traits: Option<Traits>) -> Delivery {
        self.analytics.identify(user_id, traits).await
    }
}

/// Pending `HouseCardHovered` event, started by
/// [`InteractionTracker::start_card_hover`].
pub struct HoverHandle {
    analytics: Arc<dyn AnalyticsProvider>,
    house_id: String,
    house_name: Option<String>,
    started_at: Instant,
}

impl HoverHandle {
    /// End the hover and emit the event with its duration in milliseconds.
    pub async fn finish(self) -> Delivery {
        let hover_duration = u64::try_from(self.started_at.elapsed().as_millis()).ok();
        let event = AnalyticsEvent::from(HouseCardHoveredProps {
            house_id: self.house_id,
            house_name: self.house_name,
            hover_duration,
        });
        self.analytics.track(&event).await
    }
}
