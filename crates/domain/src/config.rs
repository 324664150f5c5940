//! Application configuration structures

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ANALYTICS_SERVER_URL, DEFAULT_API_BASE_URL, DEFAULT_FLUSH_QUEUE_SIZE,
};

/// Analytics backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Noop,
    Console,
    Remote,
}

crate::impl_domain_status_conversions!(ProviderKind {
    Noop => "noop",
    Console => "console",
    Remote => "remote",
});

/// Deployment environment tag attached to analytics events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

crate::impl_domain_status_conversions!(Environment {
    Development => "development",
    Production => "production",
});

/// Analytics provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub provider: Option<ProviderKind>,
    pub environment: Environment,
    /// Ingestion key for the remote provider. `None` degrades it to a no-op.
    pub api_key: Option<String>,
    pub server_url: String,
    /// Queue length at which the remote provider flushes on its own.
    pub flush_queue_size: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            provider: None,
            environment: Environment::default(),
            api_key: None,
            server_url: DEFAULT_ANALYTICS_SERVER_URL.to_string(),
            flush_queue_size: DEFAULT_FLUSH_QUEUE_SIZE,
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub enable_analytics: bool,
    pub analytics: AnalyticsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            enable_analytics: true,
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Resolve which provider should back analytics under this configuration.
    ///
    /// Disabled analytics always wins; an explicit provider choice is
    /// honoured; otherwise development builds log to the console and
    /// production builds discard events.
    pub fn effective_provider(&self) -> ProviderKind {
        if !self.enable_analytics {
            return ProviderKind::Noop;
        }
        match self.analytics.provider {
            Some(kind) => kind,
            None if self.analytics.environment == Environment::Development => {
                ProviderKind::Console
            }
            None => ProviderKind::Noop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, provider: Option<ProviderKind>, env: Environment) -> AppConfig {
        AppConfig {
            enable_analytics: enabled,
            analytics: AnalyticsConfig { provider, environment: env, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn disabled_analytics_is_always_noop() {
        let cfg = config(false, Some(ProviderKind::Remote), Environment::Development);
        assert_eq!(cfg.effective_provider(), ProviderKind::Noop);
    }

    #[test]
    fn explicit_provider_is_honoured() {
        let remote = config(true, Some(ProviderKind::Remote), Environment::Production);
        assert_eq!(remote.effective_provider(), ProviderKind::Remote);
        let console = config(true, Some(ProviderKind::Console), Environment::Production);
        assert_eq!(console.effective_provider(), ProviderKind::Console);
    }

    #[test]
    fn unset_provider_falls_back_on_environment() {
        let dev = config(true, None, Environment::Development);
        assert_eq!(dev.effective_provider(), ProviderKind::Console);
        let prod = config(true, None, Environment::Production);
        assert_eq!(prod.effective_provider(), ProviderKind::Noop);
        let noop_dev = config(true, Some(ProviderKind::Noop), Environment::Development);
        assert_eq!(noop_dev.effective_provider(), ProviderKind::Noop);
    }

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!("REMOTE".parse::<ProviderKind>(), Ok(ProviderKind::Remote));
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert!("amplitude".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn default_config_leaves_provider_to_environment() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.analytics.provider, None);
        assert_eq!(cfg.effective_provider(), ProviderKind::Console);

        let prod: AppConfig =
            serde_json::from_str(r#"{ "analytics": { "environment": "production" } }"#).unwrap();
        assert_eq!(prod.analytics.provider, None);
        assert_eq!(prod.effective_provider(), ProviderKind::Noop);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "enable_analytics": false }"#).unwrap();
        assert!(!cfg.enable_analytics);
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.analytics.flush_queue_size, DEFAULT_FLUSH_QUEUE_SIZE);
    }
}
