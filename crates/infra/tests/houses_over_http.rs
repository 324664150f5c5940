//! Houses client wired to the real HTTP transport and console provider.

use std::sync::Arc;

use housewatch_core::{HousesApi, HousesService};
use housewatch_domain::ApiErrorKind;
use housewatch_infra::{ConsoleProvider, ConsoleSink, HttpClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer, sink: &ConsoleSink) -> HousesService {
    let http = HttpClient::new(&server.uri()).expect("http client");
    HousesService::new(Arc::new(http), Arc::new(ConsoleProvider::new(sink.clone())))
}

#[tokio::test]
async fn list_houses_logs_started_and_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Houses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Gryffindor" },
            { "id": "2", "name": "Hufflepuff" },
            { "id": "3", "name": "Ravenclaw" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let sink = ConsoleSink::memory();
    let houses = service(&server, &sink).list_houses().await.expect("houses");

    assert_eq!(houses.len(), 3);
    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[Analytics] Track: ApiRequestStarted "));
    assert!(lines[1].starts_with("[Analytics] Track: ApiRequestSuccess "));
    assert!(lines[1].contains(r#""count":3"#));
}

#[tokio::test]
async fn missing_house_is_normalized_and_tracked_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Houses/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = ConsoleSink::memory();
    let err = service(&server, &sink).get_house_by_id("nope").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.status, Some(404));
    assert_eq!(err.message, "Not found");
    let lines = sink.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains(r#""error_code":"HTTP_404""#));
}
