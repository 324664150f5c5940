mod support;

use std::sync::Arc;

use housewatch_core::{HousesApi, HousesService, HousesStore, RecordingProvider, RequestOptions};
use housewatch_domain::{ApiError, ApiErrorKind};
use serde_json::json;
use support::transport::StubTransport;
use tokio_util::sync::CancellationToken;

fn service(transport: StubTransport) -> (Arc<HousesService>, RecordingProvider) {
    let recorder = RecordingProvider::new();
    let service = HousesService::new(Arc::new(transport), Arc::new(recorder.clone()));
    (Arc::new(service), recorder)
}

#[tokio::test]
async fn listing_three_houses_emits_started_and_success() {
    let transport = StubTransport::new().respond(Ok(json!([
        { "id": "a", "name": "Gryffindor" },
        { "id": "b", "name": "Hufflepuff" },
        { "id": "c", "name": "Ravenclaw" },
    ])));
    let (service, recorder) = service(transport.clone());

    let houses = service.list_houses().await.unwrap();

    assert_eq!(houses.len(), 3);
    assert_eq!(transport.requests(), vec!["/Houses"]);
    assert_eq!(recorder.event_names(), vec!["ApiRequestStarted", "ApiRequestSuccess"]);
    let success = recorder.last_properties("ApiRequestSuccess").unwrap();
    assert_eq!(success["endpoint"], "/Houses");
    assert_eq!(success["method"], "GET");
    assert_eq!(success["count"], 3);
}

#[tokio::test]
async fn missing_house_surfaces_server_error() {
    let transport = StubTransport::new().respond(Err(ApiError::server(404, "House not found")));
    let (service, recorder) = service(transport);

    let err = service.get_house_by_id("does-not-exist").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.status, Some(404));
    assert_eq!(recorder.event_names(), vec!["ApiRequestStarted", "ApiRequestError"]);
    let props = recorder.last_properties("ApiRequestError").unwrap();
    assert_eq!(props["endpoint"], "/Houses/does-not-exist");
    assert_eq!(props["houseId"], "does-not-exist");
    assert_eq!(props["error"], "House not found");
    assert_eq!(props["error_code"], "HTTP_404");
}

#[tokio::test]
async fn empty_id_never_reaches_the_transport() {
    let transport = StubTransport::new();
    let (service, recorder) = service(transport.clone());

    let err = service.get_house_by_id("").await.unwrap_err();

    assert!(err.is_validation());
    assert!(transport.requests().is_empty());
    assert_eq!(recorder.event_names(), vec!["ApiRequestError"]);
}

#[tokio::test]
async fn cancelled_request_yields_one_error_event() {
    let transport = StubTransport::new();
    let (service, recorder) = service(transport);
    let cancel = CancellationToken::new();

    let call = {
        let service = Arc::clone(&service);
        let options = RequestOptions::default().with_cancellation(cancel.clone());
        tokio::spawn(async move { service.list_houses_with(options).await })
    };
    tokio::task::yield_now().await;
    cancel.cancel();

    let err = call.await.unwrap().unwrap_err();

    assert_eq!(err, ApiError::cancelled());
    assert_eq!(recorder.event_names(), vec!["ApiRequestStarted", "ApiRequestError"]);
    let props = recorder.last_properties("ApiRequestError").unwrap();
    assert_eq!(props["error_code"], "REQUEST_CANCELLED");
}

#[tokio::test]
async fn store_reflects_service_outcomes() {
    let transport = StubTransport::new()
        .respond(Ok(json!([{ "id": "a", "name": "Gryffindor" }])))
        .respond(Err(ApiError::timeout()));
    let (service, recorder) = service(transport);
    let store = HousesStore::new(service);

    store.fetch_houses().await;
    store.fetch_house_by_id("a").await;

    let state = store.state();
    assert_eq!(state.houses.len(), 1);
    assert!(state.selected_house.is_none());
    assert_eq!(state.error, Some(ApiError::timeout()));
    assert_eq!(
        recorder.event_names(),
        vec!["ApiRequestStarted", "ApiRequestSuccess", "ApiRequestStarted", "ApiRequestError"]
    );
}
