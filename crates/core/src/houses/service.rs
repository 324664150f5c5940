//! Houses API client with request instrumentation.
//!
//! Every call emits exactly one `ApiRequestStarted` event before the request
//! goes out and exactly one terminal event (`ApiRequestSuccess` or
//! `ApiRequestError`) once it settles. Errors are handed back unchanged.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use housewatch_domain::analytics::{
    ApiRequestErrorProps, ApiRequestStartedProps, ApiRequestSuccessProps,
};
use housewatch_domain::constants::HOUSES_ENDPOINT;
use housewatch_domain::{AnalyticsEvent, ApiError, House};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::form_urlencoded;

use super::ports::HousesApi;
use crate::analytics::AnalyticsProvider;
use crate::http_ports::{HttpMethod, HttpRequest, HttpTransport, RequestOptions};

/// Houses API client
pub struct HousesService {
    http: Arc<dyn HttpTransport>,
    analytics: Arc<dyn AnalyticsProvider>,
}

impl HousesService {
    /// Create a client over the given transport and analytics provider.
    pub fn new(http: Arc<dyn HttpTransport>, analytics: Arc<dyn AnalyticsProvider>) -> Self {
        Self { http, analytics }
    }

    /// Provider this client reports to.
    pub fn analytics(&self) -> &Arc<dyn AnalyticsProvider> {
        &self.analytics
    }

    /// `GET /Houses` with caller-supplied options (headers, cancellation).
    #[instrument(skip(self, options))]
    pub async fn list_houses_with(&self, options: RequestOptions) -> Result<Vec<House>, ApiError> {
        let call = Call { endpoint: HOUSES_ENDPOINT.to_string(), house_id: None };
        self.started(&call).await;

        let started_at = Instant::now();
        match self.fetch::<Vec<House>>(&call, options).await {
            Ok(houses) => {
                self.track(ApiRequestSuccessProps {
                    endpoint: call.endpoint.clone(),
                    method: HttpMethod::Get.to_string(),
                    house_id: None,
                    house_name: None,
                    count: Some(houses.len()),
                    response_time: Some(elapsed_ms(started_at)),
                })
                .await;
                debug!(count = houses.len(), "houses fetched");
                Ok(houses)
            }
            Err(err) => {
                self.failed(&call, &err).await;
                Err(err)
            }
        }
    }

    /// `GET /Houses/{id}` with caller-supplied options (headers, cancellation).
    #[instrument(skip(self, options))]
    pub async fn get_house_by_id_with(
        &self,
        id: &str,
        options: RequestOptions,
    ) -> Result<House, ApiError> {
        let call = Call { endpoint: house_endpoint(id), house_id: Some(id.to_string()) };

        if id.trim().is_empty() {
            let err = ApiError::validation("House ID is required");
            let call = Call { house_id: None, ..call };
            self.failed(&call, &err).await;
            return Err(err);
        }

        self.started(&call).await;

        let started_at = Instant::now();
        match self.fetch::<House>(&call, options).await {
            Ok(house) => {
                self.track(ApiRequestSuccessProps {
                    endpoint: call.endpoint.clone(),
                    method: HttpMethod::Get.to_string(),
                    house_id: call.house_id.clone(),
                    house_name: house.name().map(str::to_string),
                    count: None,
                    response_time: Some(elapsed_ms(started_at)),
                })
                .await;
                Ok(house)
            }
            Err(err) => {
                self.failed(&call, &err).await;
                Err(err)
            }
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        call: &Call,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let request = HttpRequest::get(call.endpoint.clone()).with_options(options);
        let body = self.http.send(request).await?;
        serde_json::from_value(body).map_err(|err| {
            ApiError::decode(format!("Unexpected response from {}: {err}", call.endpoint))
        })
    }

    async fn started(&self, call: &Call) {
        self.track(ApiRequestStartedProps {
            endpoint: call.endpoint.clone(),
            method: HttpMethod::Get.to_string(),
            house_id: call.house_id.clone(),
        })
        .await;
    }

    async fn failed(&self, call: &Call, err: &ApiError) {
        warn!(endpoint = %call.endpoint, kind = %err.kind, error = %err, "houses request failed");
        self.track(ApiRequestErrorProps {
            endpoint: call.endpoint.clone(),
            method: HttpMethod::Get.to_string(),
            house_id: call.house_id.clone(),
            error: err.message.clone(),
            error_code: err.code.clone(),
        })
        .await;
    }

    async fn track(&self, props: impl Into<AnalyticsEvent>) {
        let event = props.into();
        let delivery = self.analytics.track(&event).await;
        debug!(event = event.name(), ?delivery, "analytics event dispatched");
    }
}

#[async_trait]
impl HousesApi for HousesService {
    async fn list_houses(&self) -> Result<Vec<House>, ApiError> {
        self.list_houses_with(RequestOptions::default()).await
    }

    async fn get_house_by_id(&self, id: &str) -> Result<House, ApiError> {
        self.get_house_by_id_with(id, RequestOptions::default()).await
    }
}

struct Call {
    endpoint: String,
    house_id: Option<String>,
}

/// `/Houses/{id}` with `id` percent-encoded as a single path segment.
fn house_endpoint(id: &str) -> String {
    let segment: String = form_urlencoded::byte_serialize(id.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect();
    format!("{HOUSES_ENDPOINT}/{segment}")
}

fn elapsed_ms(started_at: Instant) -> u64 {
    u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
}
