//! Closed analytics event vocabulary.
//!
//! Every trackable event is one variant of [`AnalyticsEvent`] and carries
//! exactly one property struct. An event name outside this set, or a property
//! bag missing a required field, does not compile.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribute bag attached to a user by `identify`.
pub type Traits = Map<String, Value>;

macro_rules! analytics_events {
    ($($variant:ident($props:ident)),+ $(,)?) => {
        /// A single fire-and-forget analytics record.
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnalyticsEvent {
            $($variant($props),)+
        }

        impl AnalyticsEvent {
            /// Every event name in the schema, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$(stringify!($variant),)+];

            /// Wire name of the event.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }

            /// Property bag as a JSON object, with unset optionals omitted.
            pub fn properties(&self) -> Map<String, Value> {
                let value = match self {
                    $(Self::$variant(props) => serde_json::to_value(props),)+
                };
                match value {
                    Ok(Value::Object(map)) => map,
                    _ => Map::new(),
                }
            }
        }

        $(
            impl From<$props> for AnalyticsEvent {
                fn from(props: $props) -> Self {
                    Self::$variant(props)
                }
            }
        )+
    };
}

analytics_events! {
    PageView(PageViewProps),
    ButtonClicked(ButtonClickedProps),
    HouseCardHovered(HouseCardHoveredProps),
    TraitClicked(TraitClickedProps),
    SearchPerformed(SearchPerformedProps),
    FilterApplied(FilterAppliedProps),
    ScrollReachedBottom(ScrollReachedBottomProps),
    ApiRequestStarted(ApiRequestStartedProps),
    ApiRequestSuccess(ApiRequestSuccessProps),
    ApiRequestError(ApiRequestErrorProps),
    ErrorOccurred(ErrorOccurredProps),
    ErrorBoundaryTriggered(ErrorBoundaryTriggeredProps),
    SessionStarted(SessionStartedProps),
    SessionEnded(SessionEndedProps),
    FeatureUsed(FeatureUsedProps),
    EmailCaptureAttempted(EmailCaptureAttemptedProps),
    UserIdentified(UserIdentifiedProps),
    EmailCaptureError(EmailCaptureErrorProps),
    EmailFieldFocused(EmailFieldFocusedProps),
    PageLoadCompleted(PageLoadCompletedProps),
    ComponentRendered(ComponentRenderedProps),
}

// ============================================================================
// Navigation & interaction
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewProps {
    pub page_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonClickedProps {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseCardHoveredProps {
    pub house_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
    /// Milliseconds between hover start and end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_duration: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitClickedProps {
    pub trait_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPerformedProps {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAppliedProps {
    pub filter_type: String,
    pub filter_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollReachedBottomProps {
    pub page_name: String,
    /// Percentage of the scrollable height reached.
    pub scroll_depth: u32,
}

// ============================================================================
// API request instrumentation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequestStartedProps {
    pub endpoint: String,
    pub method: String,
    #[serde(rename = "houseId", default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequestSuccessProps {
    pub endpoint: String,
    pub method: String,
    #[serde(rename = "houseId", default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
    #[serde(rename = "houseName", default, skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Milliseconds from request start to decoded response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequestErrorProps {
    pub endpoint: String,
    pub method: String,
    #[serde(rename = "houseId", default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOccurredProps {
    pub error_type: String,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBoundaryTriggeredProps {
    pub component_name: String,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

// ============================================================================
// Session & feature usage
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStartedProps {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEndedProps {
    pub session_id: String,
    /// Milliseconds since the session started.
    pub session_duration: u64,
    pub pages_visited: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUsedProps {
    pub feature_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_context: Option<String>,
}

// ============================================================================
// Email capture
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCaptureAttemptedProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
    pub email_domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentifiedProps {
    pub identification_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCaptureErrorProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailFieldFocusedProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<String>,
}

// ============================================================================
// Performance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLoadCompletedProps {
    pub page_name: String,
    /// Milliseconds until the page finished loading.
    pub load_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRenderedProps {
    pub component_name: String,
    pub render_time: u64,
}
