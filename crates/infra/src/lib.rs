//! # HouseWatch Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - No-op, console and remote analytics providers
//! - The remote ingestion transport
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `housewatch-core`
//! - Contains all "impure" code (network, stdout, environment, files)

pub mod analytics;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use analytics::{
    ClientContext, ConsoleProvider, ConsoleSink, HttpIngestionTransport, NoopProvider,
    ProviderState, RemoteInit, RemoteProvider, RemoteSettings, RemoteTransport,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
