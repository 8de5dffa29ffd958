use httpmock::Method::POST;
use lead_capture::{Lead, LcError, UserData, WhatsAppValidator, submit_lead};
use serde_json::json;
use url::Url;

use crate::common::{AIRTABLE_PATH, fast_client, mock_lookup, setup_server};

fn page() -> Url {
    Url::parse("https://lp.example.com/?utm_source=instagram&utm_campaign=black-friday").unwrap()
}

fn lead() -> Lead {
    Lead::new("Carlos Souza", "11 98765-4321", "carlos@example.com")
}

#[tokio::test]
async fn validated_lead_fires_event_and_is_stored() {
    let server = setup_server();
    let _lookup = mock_lookup(&server, "+5511987654321", true);
    let event = server.mock(|when, then| {
        when.method(POST).path("/api/track/lead");
        then.status(200)
            .json_body(json!({ "success": true, "fbtrace_id": "trace-1" }));
    });
    let store = server.mock(|when, then| {
        when.method(POST)
            .path(AIRTABLE_PATH)
            .json_body(json!({
                "fields": {
                    "Nome do lead": "Carlos Souza",
                    "Telefone do lead": "11 98765-4321",
                    "Email do lead": "carlos@example.com",
                    "utm_source": "instagram",
                    "utm_medium": "",
                    "utm_campaign": "black-friday",
                    "utm_term": "",
                    "utm_content": ""
                }
            }));
        then.status(200).json_body(json!({ "id": "recXYZ" }));
    });

    let client = fast_client(&server, 2);
    let validation = WhatsAppValidator::new(&client)
        .unwrap()
        .validate(&lead().phone)
        .await;

    let submission = submit_lead(&client, &validation, lead(), &page(), UserData::with_external_id())
        .await
        .unwrap();

    event.assert();
    store.assert();
    assert_eq!(submission.record.id, "recXYZ");
    let receipt = submission.event.unwrap();
    assert_eq!(receipt.fbtrace_id.as_deref(), Some("trace-1"));
    assert_eq!(receipt.event_id.len(), 36);
}

#[tokio::test]
async fn relay_outage_does_not_block_storage() {
    let server = setup_server();
    let _lookup = mock_lookup(&server, "+5511987654321", true);
    let event = server.mock(|when, then| {
        when.method(POST).path("/api/track/lead");
        then.status(502).body("bad gateway");
    });
    let store = server.mock(|when, then| {
        when.method(POST).path(AIRTABLE_PATH);
        then.status(200).json_body(json!({ "id": "recOK" }));
    });

    let client = fast_client(&server, 2);
    let validation = WhatsAppValidator::new(&client)
        .unwrap()
        .validate("11987654321")
        .await;

    let submission = submit_lead(&client, &validation, lead(), &page(), UserData::default())
        .await
        .unwrap();

    event.assert_calls(2);
    store.assert_calls(1);
    assert_eq!(submission.record.id, "recOK");
    assert_eq!(submission.event, None);
}

#[tokio::test]
async fn number_without_whatsapp_is_refused() {
    let server = setup_server();
    let _lookup = mock_lookup(&server, "+5511987654321", false);
    let any_tracking = server.mock(|when, then| {
        when.method(POST).path("/api/track/lead");
        then.status(200).json_body(json!({ "success": true }));
    });
    let store = server.mock(|when, then| {
        when.method(POST).path(AIRTABLE_PATH);
        then.status(200).json_body(json!({ "id": "recNO" }));
    });

    let client = fast_client(&server, 2);
    let validation = WhatsAppValidator::new(&client)
        .unwrap()
        .validate("11987654321")
        .await;
    assert!(validation.validated);

    let err = submit_lead(&client, &validation, lead(), &page(), UserData::default())
        .await
        .unwrap_err();

    any_tracking.assert_calls(0);
    store.assert_calls(0);
    match err {
        LcError::NotValidated(msg) => assert!(msg.starts_with("+5511987654321"), "{msg}"),
        other => panic!("expected NotValidated, got {other:?}"),
    }
}

#[tokio::test]
async fn storage_failure_is_returned() {
    let server = setup_server();
    let _lookup = mock_lookup(&server, "+5511987654321", true);
    let _event = server.mock(|when, then| {
        when.method(POST).path("/api/track/lead");
        then.status(200).json_body(json!({ "success": true }));
    });
    let store = server.mock(|when, then| {
        when.method(POST).path(AIRTABLE_PATH);
        then.status(401).body(r#"{"error":"AUTHENTICATION_REQUIRED"}"#);
    });

    let client = fast_client(&server, 2);
    let validation = WhatsAppValidator::new(&client)
        .unwrap()
        .validate("11987654321")
        .await;

    let err = submit_lead(&client, &validation, lead(), &page(), UserData::default())
        .await
        .unwrap_err();
    store.assert_calls(1);
    assert!(matches!(err, LcError::Status { status: 401, .. }), "{err:?}");
}
