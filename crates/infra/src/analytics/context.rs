//! Client context attached to remote analytics events.

use serde::{Deserialize, Serialize};

/// Where and on what the events are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContext {
    pub current_url: Option<String>,
    /// Width and height in pixels.
    pub viewport: Option<(u32, u32)>,
    pub user_agent: String,
    pub platform: String,
}

impl Default for ClientContext {
    fn default() -> Self {
        Self {
            current_url: None,
            viewport: None,
            user_agent: format!("housewatch/{}", env!("CARGO_PKG_VERSION")),
            platform: std::env::consts::OS.to_string(),
        }
    }
}

impl ClientContext {
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some((width, height));
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Viewport formatted as `WxH`.
    pub fn viewport_label(&self) -> Option<String> {
        self.viewport.map(|(width, height)| format!("{width}x{height}"))
    }
}
