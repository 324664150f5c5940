//! # HouseWatch Core
//!
//! Business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (analytics provider, HTTP transport, houses API)
//! - The instrumented houses API client and its fetch store
//! - Interaction, page and email-capture tracking helpers
//!
//! ## Architecture Principles
//! - Only depends on `housewatch-domain`
//! - No HTTP client or platform code
//! - All external dependencies via traits

pub mod analytics;
pub mod houses;
pub mod http_ports;

pub use analytics::{
    AnalyticsProvider, Delivery, EmailCapture, HoverHandle, InteractionTracker, PageTracker,
    RecordedCall, RecordingProvider, SuppressReason,
};
pub use houses::{HousesApi, HousesService, HousesState, HousesStore};
pub use http_ports::{HttpMethod, HttpRequest, HttpTransport, RequestOptions};
