mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{PageLocator, RecordingTarget, Write};
use counter_core::{Phase, StyleTag};
use counter_engine::{
    EndpointConfig, Environment, FetchSettings, LoadSequence, ReqwestFetcher, SequenceSettings,
    SiteParams, TriggerOutcome, WidgetRuntime,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sequence_for(server: &MockServer) -> LoadSequence {
    let params = SiteParams {
        api_url_blue: server.uri(),
        api_url_green: "https://green.invalid".to_string(),
    };
    let endpoint = EndpointConfig::resolve(&params, Environment::Blue).expect("endpoint");
    LoadSequence::new(
        Arc::new(ReqwestFetcher::new(endpoint, FetchSettings::default())),
        SequenceSettings::default(),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_resolves_to_error_view_after_minimum() {
    counter_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/counter"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "Server error"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut target = RecordingTarget::new();
    let started = Instant::now();
    let phase = sequence_for(&server).run(&mut target).await;
    let elapsed = started.elapsed();

    assert_eq!(phase, Phase::Error);
    assert!(elapsed >= Duration::from_millis(400), "settled after {elapsed:?}");
    assert!(elapsed < Duration::from_millis(2_400), "settled after {elapsed:?}");
    assert_eq!(
        target.writes().last(),
        Some(&Write::Text("--".to_string()))
    );
    assert_eq!(target.styles().last().map(|(_, style)| *style), Some(StyleTag::Error));
}

#[tokio::test(flavor = "multi_thread")]
async fn runtime_drives_one_sequence_from_document_ready() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/counter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 17})))
        .expect(1)
        .mount(&server)
        .await;

    let target = RecordingTarget::new();
    let runtime = WidgetRuntime::start(
        sequence_for(&server),
        PageLocator::with_target(target.clone()),
    )
    .expect("runtime");
    assert!(runtime.document_ready());
    assert!(!runtime.document_ready());

    let outcome = tokio::task::spawn_blocking(move || runtime.wait())
        .await
        .expect("wait");

    assert_eq!(outcome, TriggerOutcome::Completed(Phase::Loaded));
    assert_eq!(target.writes().last(), Some(&Write::Text("17".to_string())));
}

#[tokio::test(flavor = "multi_thread")]
async fn runtime_without_ready_is_abandoned() {
    let server = MockServer::start().await;

    let target = RecordingTarget::new();
    let runtime = WidgetRuntime::start(
        sequence_for(&server),
        PageLocator::with_target(target.clone()),
    )
    .expect("runtime");

    let outcome = tokio::task::spawn_blocking(move || runtime.wait())
        .await
        .expect("wait");

    assert_eq!(outcome, TriggerOutcome::Abandoned);
    assert!(target.writes().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn widget_finishes_after_host_stops_waiting() {
    counter_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/counter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 17})))
        .expect(1)
        .mount(&server)
        .await;

    let target = RecordingTarget::new();
    let runtime = WidgetRuntime::start(
        sequence_for(&server),
        PageLocator::with_target(target.clone()),
    )
    .expect("runtime");
    assert!(runtime.document_ready());
    drop(runtime);

    let deadline = Instant::now() + Duration::from_secs(3);
    while target.writes().last() != Some(&Write::Text("17".to_string())) {
        assert!(Instant::now() < deadline, "writes so far: {:?}", target.writes());
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(target.styles().last().map(|(_, style)| *style), Some(StyleTag::Loaded));
}
