//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Upstream houses API
pub const DEFAULT_API_BASE_URL: &str = "https://wizard-world-api.herokuapp.com";
pub const HOUSES_ENDPOINT: &str = "/Houses";
pub const DEFAULT_USER_AGENT: &str = "WizardWorld-App/1.0";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// Normalized error codes
pub const CODE_VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CODE_NETWORK_ERROR: &str = "NETWORK_ERROR";
pub const CODE_REQUEST_CANCELLED: &str = "REQUEST_CANCELLED";
pub const CODE_TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";
pub const CODE_DECODE_ERROR: &str = "DECODE_ERROR";
pub const CODE_UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

// Analytics ingestion
pub const DEFAULT_ANALYTICS_SERVER_URL: &str = "https://api2.amplitude.com/2/httpapi";
pub const DEFAULT_FLUSH_QUEUE_SIZE: usize = 30;
pub const PAGE_VIEW_EVENT: &str = "PageView";
pub const IDENTIFY_EVENT: &str = "$identify";

// Page tracking
pub const SCROLL_BOTTOM_THRESHOLD_PERCENT: u32 = 90;
pub const PAGE_HOUSES_LIST: &str = "houses_list";
pub const PAGE_HOUSE_DETAIL: &str = "house_detail";
pub const PAGE_UNKNOWN: &str = "unknown";
