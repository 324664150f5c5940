//! # HouseWatch App
//!
//! Application layer - service wiring and the `housewatch` binary.
//!
//! This crate contains:
//! - The service locator (lazy singletons, reconfiguration)
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Chooses the analytics provider from configuration

pub mod context;
pub mod utils;

// Re-export for convenience
pub use context::{ServiceLocator, ServiceLocatorBuilder};
pub use utils::logging::init_logging;
