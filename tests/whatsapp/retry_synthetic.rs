use httpmock::Method::POST;
use lead_capture::{LcClient, RetryConfig, ValidationSource, WhatsAppValidator};
use std::time::{Duration, Instant};
use url::Url;

use crate::common::{
    EVO_KEY, INSTANCE, LOOKUP_PATH, client_builder, fast_client, fast_retry, setup_server,
};

#[tokio::test]
async fn persistent_5xx_makes_two_attempts_one_second_apart() {
    let server = setup_server();
    let fail = server.mock(|when, then| {
        when.method(POST).path(LOOKUP_PATH);
        then.status(503).body("Service Unavailable");
    });

    // default policy: 2 attempts, fixed 1s delay
    let client = client_builder(&server).build().unwrap();
    let validator = WhatsAppValidator::new(&client).unwrap();

    let started = Instant::now();
    let result = validator.validate("11987654321").await;
    let elapsed = started.elapsed();

    fail.assert_calls(2);
    assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "{elapsed:?}");

    assert!(!result.validated);
    assert!(!result.exists);
    assert_eq!(result.phone, "+5511987654321");
    assert_eq!(result.source, ValidationSource::EvolutionApi);
    let error = result.error.unwrap();
    assert!(error.contains("503"), "{error}");
    assert!(error.contains("Service Unavailable"), "{error}");
}

#[tokio::test]
async fn malformed_body_is_retried_then_reported() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(LOOKUP_PATH);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"status": "ok"}"#);
    });

    let client = fast_client(&server, 2);
    let validator = WhatsAppValidator::new(&client).unwrap();

    let result = validator.validate("11987654321").await;
    mock.assert_calls(2);
    assert!(!result.validated);
    assert!(result.error.unwrap().contains("invalid or empty"));
}

#[tokio::test]
async fn empty_array_is_a_failure() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(LOOKUP_PATH);
        then.status(200).body("[]");
    });

    let client = fast_client(&server, 2);
    let validator = WhatsAppValidator::new(&client).unwrap();

    let result = validator.validate("11987654321").await;
    mock.assert_calls(2);
    assert!(!result.validated);
}

#[tokio::test]
async fn non_json_body_is_a_failure() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(LOOKUP_PATH);
        then.status(200).body("<html>maintenance</html>");
    });

    let client = fast_client(&server, 2);
    let validator = WhatsAppValidator::new(&client).unwrap();

    let result = validator.validate("11987654321").await;
    mock.assert_calls(2);
    assert!(!result.validated);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn retry_policy_override_controls_attempts() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(LOOKUP_PATH);
        then.status(500).body("oops");
    });

    let client = fast_client(&server, 2);

    let single = WhatsAppValidator::new(&client)
        .unwrap()
        .retry_policy(Some(RetryConfig::single_attempt()));
    single.validate("11987654321").await;
    mock.assert_calls(1);

    let four = WhatsAppValidator::new(&client)
        .unwrap()
        .retry_policy(Some(fast_retry(4)));
    four.validate("11987654321").await;
    mock.assert_calls(5);
}

#[tokio::test]
async fn transport_errors_collapse_into_unvalidated_result() {
    // nothing listens on port 1
    let client = LcClient::builder()
        .evolution_base(Url::parse("http://127.0.0.1:1/").unwrap())
        .evolution_credentials(INSTANCE, EVO_KEY)
        .retry_config(fast_retry(2))
        .build()
        .unwrap();
    let validator = WhatsAppValidator::new(&client).unwrap();

    let result = validator.validate("11987654321").await;
    assert!(!result.validated);
    assert!(!result.exists);
    assert!(result.error.unwrap().starts_with("HTTP error"));
}
