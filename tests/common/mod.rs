#![allow(dead_code)]

use httpmock::{Method::POST, Mock, MockServer};
use lead_capture::{Backoff, LcClient, LcClientBuilder, RetryConfig};
use serde_json::json;
use std::time::Duration;
use url::Url;

pub const INSTANCE: &str = "inst-1";
pub const EVO_KEY: &str = "evo-key-1234";
pub const AIRTABLE_TOKEN: &str = "pat-token-5678";
pub const AIRTABLE_BASE: &str = "appBASE";
pub const AIRTABLE_TABLE: &str = "tblLEADS";

pub const LOOKUP_PATH: &str = "/evo/chat/whatsappNumbers/inst-1";
pub const AIRTABLE_PATH: &str = "/v0/appBASE/tblLEADS";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A builder with every service pointed at `server`.
pub fn client_builder(server: &MockServer) -> LcClientBuilder {
    let base = Url::parse(&server.base_url()).unwrap();
    LcClient::builder()
        .evolution_base(base.join("evo/").unwrap())
        .evolution_credentials(INSTANCE, EVO_KEY)
        .airtable_base(base.clone())
        .airtable_table(AIRTABLE_TOKEN, AIRTABLE_BASE, AIRTABLE_TABLE)
        .conversions_base(base)
}

/// Like [`client_builder`], with retries 1ms apart so tests stay fast.
pub fn fast_client(server: &MockServer, attempts: u32) -> LcClient {
    client_builder(server)
        .retry_config(fast_retry(attempts))
        .build()
        .unwrap()
}

pub fn fast_retry(attempts: u32) -> RetryConfig {
    RetryConfig {
        enabled: true,
        max_attempts: attempts,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
    }
}

/// Evolution lookup for `phone` answering with `exists`.
pub fn mock_lookup<'a>(server: &'a MockServer, phone: &str, exists: bool) -> Mock<'a> {
    let phone = phone.to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path(LOOKUP_PATH)
            .header("apikey", EVO_KEY)
            .json_body(json!({ "numbers": [phone.clone()] }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!([{
                "exists": exists,
                "jid": format!("{}@s.whatsapp.net", phone.trim_start_matches('+')),
                "number": phone.trim_start_matches('+'),
            }]));
    })
}
