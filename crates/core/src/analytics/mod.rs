//! Analytics façade: provider port, in-memory recorder and the tracking
//! helpers consumers call.

pub mod email;
pub mod interactions;
pub mod pages;
pub mod ports;
pub mod recording;

pub use email::EmailCapture;
pub use interactions::{HoverHandle, InteractionTracker};
pub use pages::{page_name_for_path, PageTracker};
pub use ports::{AnalyticsProvider, Delivery, SuppressReason};
pub use recording::{RecordedCall, RecordingProvider};
