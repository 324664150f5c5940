//! # HouseWatch Domain
//!
//! Domain types shared by every HouseWatch crate.
//!
//! This crate contains:
//! - The closed analytics event vocabulary ([`AnalyticsEvent`])
//! - The normalized API error shape and the application error type
//! - Configuration structures
//! - The opaque [`House`] record and domain constants
//!
//! ## Architecture
//! - No dependencies on other HouseWatch crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod analytics;
pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use analytics::{AnalyticsEvent, PageViewProps, Traits};
pub use config::*;
pub use errors::*;
pub use types::*;
