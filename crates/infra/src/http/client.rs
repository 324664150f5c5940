use std::time::Duration;

use async_trait::async_trait;
use housewatch_core::{HttpMethod, HttpRequest, HttpTransport};
use housewatch_domain::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use housewatch_domain::{ApiError, HouseWatchError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::errors::{api_error_from_reqwest, InfraError};

/// HTTP client bound to one base URL, returning normalized errors.
///
/// Requests are sent once; there is no retry.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new(base_url: &str) -> Result<Self, HouseWatchError> {
        Self::builder().base_url(base_url).build()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn execute(&self, request: reqwest::Request) -> Result<Value, ApiError> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let response = self.client.execute(request).await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            api_error_from_reqwest(&err)
        })?;

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        if !status.is_success() {
            let message = error_message(status, response).await;
            return Err(ApiError::server(status.as_u16(), message));
        }

        decode_body(response).await
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let HttpRequest { method, path, body, options } = request;

        let mut builder = self.client.request(reqwest_method(method), self.endpoint(&path));
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }
        let request = builder.build().map_err(|err| api_error_from_reqwest(&err))?;

        match options.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        debug!(%method, %path, "HTTP request cancelled");
                        Err(ApiError::cancelled())
                    }
                    result = self.execute(request) => result,
                }
            }
            None => self.execute(request).await,
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: HeaderMap,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            default_headers,
        }
    }
}

impl HttpClientBuilder {
    /// Base URL every request path is appended to. A trailing slash is
    /// dropped.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Merge headers into the defaults; later values replace earlier ones.
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in &headers {
            self.default_headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Add one default header.
    pub fn header(self, name: &str, value: &str) -> Result<Self, HouseWatchError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| HouseWatchError::Config(format!("invalid header name {name}: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| HouseWatchError::Config(format!("invalid header value: {err}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(name, value);
        Ok(self.default_headers(headers))
    }

    pub fn build(self) -> Result<HttpClient, HouseWatchError> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| {
            HouseWatchError::Config(format!("invalid base URL {:?}: {err}", self.base_url))
        })?;

        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            HouseWatchError::from(infra)
        })?;

        Ok(HttpClient { client, base_url })
    }
}

const fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

/// Successful bodies: JSON is decoded; an empty or non-JSON body is `Null`.
async fn decode_body(response: Response) -> Result<Value, ApiError> {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("json"));

    let bytes = response.bytes().await.map_err(|err| api_error_from_reqwest(&err))?;
    if !is_json || bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::decode(format!("Invalid JSON response: {err}")))
}

/// Pick the most useful message from an error response: JSON `message`,
/// then JSON `error`, then the raw body, then the status line.
async fn error_message(status: StatusCode, response: Response) -> String {
    let status_line = || {
        format!("HTTP {} {}", status.as_u16(), status.canonical_reason().unwrap_or_default())
            .trim_end()
            .to_string()
    };

    let Ok(text) = response.text().await else {
        return status_line();
    };
    let text = text.trim();
    if text.is_empty() {
        return status_line();
    }

    if let Ok(Value::Object(body)) = serde_json::from_str::<Value>(text) {
        for key in ["message", "error"] {
            if let Some(message) = body.get(key).and_then(Value::as_str) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use housewatch_core::RequestOptions;
    use housewatch_domain::ApiErrorKind;
    use serde_json::json;
    use tokio_util::sync::CancellationToken;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::builder().base_url(format!("{}/", server.uri())).build().expect("http client")
    }

    #[tokio::test]
    async fn decodes_json_with_default_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Houses"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", "WizardWorld-App/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "1" }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.send(HttpRequest::get("/Houses")).await.expect("response");

        assert_eq!(body, json!([{ "id": "1" }]));
    }

    #[test]
    fn trailing_slash_in_base_url_is_dropped() {
        let client = HttpClient::new("https://example.test/api/").expect("http client");
        assert_eq!(client.base_url(), "https://example.test/api");
        assert_eq!(client.endpoint("/Houses"), "https://example.test/api/Houses");
    }

    #[tokio::test]
    async fn per_request_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("x-request-id", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let request = HttpRequest::get("/Houses")
            .with_options(RequestOptions::default().with_header("X-Request-Id", "abc"));
        client.send(request).await.expect("response");
    }

    #[tokio::test]
    async fn server_error_uses_json_message_and_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "House not found" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.send(HttpRequest::get("/Houses/missing")).await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Server);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.code(), Some("HTTP_404"));
        assert_eq!(err.message, "House not found");
    }

    #[tokio::test]
    async fn server_error_falls_back_to_raw_text_then_status_line() {
        let server = MockServer::start().await;
        Mock::given(path("/text"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;
        Mock::given(path("/empty"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        Mock::given(path("/error-field"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "bad id" })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let text = client.send(HttpRequest::get("/text")).await.unwrap_err();
        let empty = client.send(HttpRequest::get("/empty")).await.unwrap_err();
        let field = client.send(HttpRequest::get("/error-field")).await.unwrap_err();

        assert_eq!(text.message, "upstream exploded");
        assert_eq!(empty.message, "HTTP 503 Service Unavailable");
        assert_eq!(field.message, "bad id");
    }

    #[tokio::test]
    async fn non_json_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Houses/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let body = client.send(HttpRequest::get("/Houses/1")).await.expect("response");
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(&format!("http://{addr}")).expect("http client");
        let err = client.send(HttpRequest::get("/Houses")).await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Network);
        assert!(err.status.is_none());
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::builder()
            .base_url(server.uri())
            .timeout(Duration::from_millis(50))
            .build()
            .expect("http client");
        let err = client.send(HttpRequest::get("/Houses")).await.unwrap_err();

        assert_eq!(err, ApiError::timeout());
    }

    #[tokio::test]
    async fn cancellation_aborts_in_flight_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = CancellationToken::new();
        let request = HttpRequest::get("/Houses")
            .with_options(RequestOptions::default().with_cancellation(token.clone()));

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        });
        let err = client.send(request).await.unwrap_err();
        canceller.await.unwrap();

        assert_eq!(err, ApiError::cancelled());
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = HttpClient::new("not a url").unwrap_err();
        assert!(matches!(err, HouseWatchError::Config(_)));
    }
}
