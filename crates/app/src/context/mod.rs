//! Service locator - dependency injection container
//!
//! Owns the active [`AppConfig`] and builds the HTTP client, the analytics
//! provider and the houses client on first use. [`ServiceLocator::reconfigure`]
//! swaps the configuration and drops every cached instance at once; callers
//! that already hold an `Arc` keep using it until they ask again.

use std::sync::Arc;

use housewatch_core::{AnalyticsProvider, HousesService};
use housewatch_domain::{AppConfig, ProviderKind, Result};
use housewatch_infra::{
    ConsoleProvider, ConsoleSink, HttpClient, HttpIngestionTransport, NoopProvider,
    RemoteInit, RemoteProvider, RemoteSettings,
};
use parking_lot::RwLock;
use tracing::{debug, info};

type DynAnalyticsProvider = dyn AnalyticsProvider + 'static;

#[derive(Default)]
struct Slots {
    config: AppConfig,
    generation: u64,
    http: Option<Arc<HttpClient>>,
    analytics: Option<Arc<DynAnalyticsProvider>>,
    houses: Option<Arc<HousesService>>,
}

/// Lazily-built application services.
pub struct ServiceLocator {
    slots: RwLock<Slots>,
    console_sink: ConsoleSink,
    remote_init: RemoteInit,
}

impl ServiceLocator {
    /// Locator writing console analytics to stdout and sharing the
    /// process-wide remote setup.
    pub fn new(config: AppConfig) -> Self {
        Self::builder().config(config).build()
    }

    pub fn builder() -> ServiceLocatorBuilder {
        ServiceLocatorBuilder::default()
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> AppConfig {
        self.slots.read().config.clone()
    }

    /// Number of reconfigurations applied so far.
    pub fn generation(&self) -> u64 {
        self.slots.read().generation
    }

    pub fn http_client(&self) -> Result<Arc<HttpClient>> {
        if let Some(http) = self.slots.read().http.clone() {
            return Ok(http);
        }
        let mut slots = self.slots.write();
        Self::http_slot(&mut slots)
    }

    pub fn analytics(&self) -> Result<Arc<DynAnalyticsProvider>> {
        if let Some(analytics) = self.slots.read().analytics.clone() {
            return Ok(analytics);
        }
        let mut slots = self.slots.write();
        self.analytics_slot(&mut slots)
    }

    /// Houses client wired to the HTTP client and provider current at build
    /// time.
    pub fn houses_api(&self) -> Result<Arc<HousesService>> {
        if let Some(houses) = self.slots.read().houses.clone() {
            return Ok(houses);
        }
        let mut slots = self.slots.write();
        if let Some(houses) = slots.houses.clone() {
            return Ok(houses);
        }
        let http = Self::http_slot(&mut slots)?;
        let analytics = self.analytics_slot(&mut slots)?;
        let houses = Arc::new(HousesService::new(http, analytics));
        slots.houses = Some(Arc::clone(&houses));
        Ok(houses)
    }

    /// Replace the configuration and drop every cached service.
    pub fn reconfigure(&self, config: AppConfig) {
        let mut slots = self.slots.write();
        slots.config = config;
        slots.http = None;
        slots.analytics = None;
        slots.houses = None;
        slots.generation += 1;
        info!(generation = slots.generation, "service locator reconfigured");
    }

    fn http_slot(slots: &mut Slots) -> Result<Arc<HttpClient>> {
        if let Some(http) = slots.http.clone() {
            return Ok(http);
        }
        let http = Arc::new(HttpClient::new(&slots.config.api_base_url)?);
        debug!(base_url = http.base_url(), "http client built");
        slots.http = Some(Arc::clone(&http));
        Ok(http)
    }

    fn analytics_slot(&self, slots: &mut Slots) -> Result<Arc<DynAnalyticsProvider>> {
        if let Some(analytics) = slots.analytics.clone() {
            return Ok(analytics);
        }
        let kind = slots.config.effective_provider();
        let analytics: Arc<DynAnalyticsProvider> = match kind {
            ProviderKind::Noop => Arc::new(NoopProvider::new()),
            ProviderKind::Console => Arc::new(ConsoleProvider::new(self.console_sink.clone())),
            ProviderKind::Remote => {
                let settings = &slots.config.analytics;
                let transport = HttpIngestionTransport::new(&settings.server_url)?;
                Arc::new(RemoteProvider::new(
                    RemoteSettings::from(settings),
                    Arc::new(transport),
                    self.remote_init.clone(),
                ))
            }
        };
        info!(provider = %kind, "analytics provider built");
        slots.analytics = Some(Arc::clone(&analytics));
        Ok(analytics)
    }
}

/// Builder for [`ServiceLocator`].
#[derive(Debug, Default)]
pub struct ServiceLocatorBuilder {
    config: AppConfig,
    console_sink: ConsoleSink,
    remote_init: Option<RemoteInit>,
}

impl ServiceLocatorBuilder {
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Where the console provider writes.
    pub fn console_sink(mut self, sink: ConsoleSink) -> Self {
        self.console_sink = sink;
        self
    }

    /// Setup handle shared by remote providers. Defaults to
    /// [`RemoteInit::global`].
    pub fn remote_init(mut self, init: RemoteInit) -> Self {
        self.remote_init = Some(init);
        self
    }

    pub fn build(self) -> ServiceLocator {
        ServiceLocator {
            slots: RwLock::new(Slots { config: self.config, ..Slots::default() }),
            console_sink: self.console_sink,
            remote_init: self.remote_init.unwrap_or_else(RemoteInit::global),
        }
    }
}
