//! Provider that logs every operation locally.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use housewatch_core::analytics::{AnalyticsProvider, Delivery, SuppressReason};
use housewatch_domain::{AnalyticsEvent, PageViewProps, ProviderKind, Traits};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing::{error, info};

/// Destination for console analytics lines.
#[derive(Debug, Clone, Default)]
pub enum ConsoleSink {
    #[default]
    Stdout,
    /// Shared in-memory buffer, one entry per line.
    Memory(Arc<Mutex<Vec<String>>>),
}

impl ConsoleSink {
    pub fn memory() -> Self {
        Self::Memory(Arc::default())
    }

    /// Lines written so far. Always empty for stdout.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Stdout => Vec::new(),
            Self::Memory(lines) => lines.lock().clone(),
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                writeln!(out, "{line}")?;
                out.flush()
            }
            Self::Memory(lines) => {
                lines.lock().push(line.to_string());
                Ok(())
            }
        }
    }
}

/// Development provider: one `[Analytics] ...` line per operation.
#[derive(Debug, Clone, Default)]
pub struct ConsoleProvider {
    sink: ConsoleSink,
}

impl ConsoleProvider {
    pub fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &ConsoleSink {
        &self.sink
    }

    fn emit(&self, line: &str) -> Delivery {
        info!(target: "housewatch::analytics", "{line}");
        match self.sink.write_line(line) {
            Ok(()) => Delivery::Delivered,
            Err(err) => {
                error!(error = %err, "failed to write analytics line");
                Delivery::Suppressed(SuppressReason::Transport)
            }
        }
    }
}

#[async_trait]
impl AnalyticsProvider for ConsoleProvider {
    async fn track(&self, event: &AnalyticsEvent) -> Delivery {
        let properties = Value::Object(event.properties());
        self.emit(&format!("[Analytics] Track: {} {properties}", event.name()))
    }

    async fn identify(&self, user_id: &str, traits: Option<Traits>) -> Delivery {
        let payload = json!({ "userId": user_id, "traits": traits });
        self.emit(&format!("[Analytics] Identify: {payload}"))
    }

    async fn page(&self, page_name: &str, properties: Option<PageViewProps>) -> Delivery {
        let payload = json!({ "name": page_name, "properties": properties });
        self.emit(&format!("[Analytics] Page: {payload}"))
    }

    async fn flush(&self) -> Delivery {
        self.emit("[Analytics] Flush")
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Console
    }
}

#[cfg(test)]
mod tests {
    use housewatch_domain::analytics::ApiRequestStartedProps;

    use super::*;

    #[tokio::test]
    async fn writes_one_line_per_operation() {
        let sink = ConsoleSink::memory();
        let provider = ConsoleProvider::new(sink.clone());

        let event = AnalyticsEvent::from(ApiRequestStartedProps {
            endpoint: "/Houses".into(),
            method: "GET".into(),
            house_id: None,
        });
        assert_eq!(provider.track(&event).await, Delivery::Delivered);
        provider.identify("u1", None).await;
        provider
            .page(
                "houses_list",
                Some(PageViewProps { page_name: "houses_list".into(), path: None }),
            )
            .await;
        provider.flush().await;

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            r#"[Analytics] Track: ApiRequestStarted {"endpoint":"/Houses","method":"GET"}"#
        );
        assert!(lines[1].starts_with("[Analytics] Identify: "));
        assert!(lines[1].contains(r#""userId":"u1""#));
        assert!(lines[2].contains(r#""name":"houses_list""#));
        assert_eq!(lines[3], "[Analytics] Flush");
    }
}
