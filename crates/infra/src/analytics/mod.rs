//! Analytics provider implementations.

pub mod console;
pub mod context;
pub mod noop;
pub mod remote;
pub mod transport;

pub use console::{ConsoleProvider, ConsoleSink};
pub use context::ClientContext;
pub use noop::NoopProvider;
pub use remote::{ProviderState, RemoteInit, RemoteProvider, RemoteSettings};
pub use transport::{HttpIngestionTransport, IngestBatch, IngestEvent, RemoteTransport};
