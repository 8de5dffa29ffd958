//! Facebook Conversions API events, sent through a tracking relay.

mod model;
mod wire;

pub use model::{EventKind, TrackReceipt, UserData};

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::Url;
use uuid::Uuid;

use crate::attribution::{self, CLICK_ID_PARAM};
use crate::core::client::retry::run_with_retry;
use crate::core::{LcClient, LcError, RetryConfig, net};
use wire::{ACTION_SOURCE, TrackPayload, TrackResponse, WireUserData};

/// Name of the custom event fired when the lead form is filled in.
pub const FORM_FILLED_EVENT: &str = "PreencheuFormulario";

/// A builder for one conversion event.
///
/// The event id is generated when the builder is created. Pass [`EventBuilder::event_id`] to
/// the browser pixel (`fbq('track', name, data, { eventID })`) so Facebook can pair the browser
/// and server copies. Retries reuse the same id.
pub struct EventBuilder {
    client: LcClient,
    kind: EventKind,
    name: String,
    event_id: String,
    user_data: UserData,
    custom_data: Map<String, Value>,
    event_source_url: Option<String>,
    url_parameters: BTreeMap<String, String>,
    retry_override: Option<RetryConfig>,
}

impl EventBuilder {
    /// Creates a new event named `name`.
    pub fn new(client: &LcClient, kind: EventKind, name: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            kind,
            name: name.into(),
            event_id: Uuid::new_v4().to_string(),
            user_data: UserData::default(),
            custom_data: Map::new(),
            event_source_url: None,
            url_parameters: BTreeMap::new(),
            retry_override: None,
        }
    }

    /// The deduplication id this event will be sent with.
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Replaces the generated event id, e.g. with one the browser pixel already used.
    #[must_use]
    pub fn with_event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = id.into();
        self
    }

    #[must_use]
    pub fn user_data(mut self, user: UserData) -> Self {
        self.user_data = user;
        self
    }

    /// Replaces all custom data.
    #[must_use]
    pub fn custom_data(mut self, data: Map<String, Value>) -> Self {
        self.custom_data = data;
        self
    }

    /// Adds one custom data field.
    #[must_use]
    pub fn custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_data.insert(key.into(), value.into());
        self
    }

    /// Uses `page` as the event source URL and copies its query parameters.
    #[must_use]
    pub fn page(mut self, page: &Url) -> Self {
        self.event_source_url = Some(page.to_string());
        self.url_parameters = attribution::url_parameters(page);
        self
    }

    #[must_use]
    pub fn event_source_url(mut self, url: impl Into<String>) -> Self {
        self.event_source_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn url_parameters(mut self, params: BTreeMap<String, String>) -> Self {
        self.url_parameters = params;
        self
    }

    /// Overrides the client's default retry policy for this event.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// The relay path for this event, e.g. `api/track/custom/preencheuformulario`.
    pub fn path(&self) -> String {
        let name = self.name.to_lowercase();
        match self.kind {
            EventKind::Standard => format!("api/track/{name}"),
            EventKind::Custom => format!("api/track/custom/{name}"),
        }
    }

    /// Sends the event to the relay.
    ///
    /// # Errors
    ///
    /// Returns [`LcError::Config`] without `API_BASE_URL`, [`LcError::Status`] on a non-2xx
    /// answer, and [`LcError::Rejected`] when the relay reports `success: false`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(event = %self.name, event_id = %self.event_id))
    )]
    pub async fn send(mut self) -> Result<TrackReceipt, LcError> {
        let url = self.client.conversions_endpoint(&self.path())?;
        if self.kind == EventKind::Custom {
            self.custom_data
                .insert("event_name".into(), Value::String(self.name.clone()));
        }

        let click_id = self
            .url_parameters
            .get(CLICK_ID_PARAM)
            .map(String::as_str)
            .filter(|id| !id.is_empty());
        let payload = TrackPayload {
            event_id: &self.event_id,
            user_data: WireUserData::new(&self.user_data, click_id),
            custom_data: &self.custom_data,
            event_source_url: self.event_source_url.as_deref(),
            url_parameters: &self.url_parameters,
            action_source: ACTION_SOURCE,
        };

        let cfg = self
            .retry_override
            .as_ref()
            .unwrap_or_else(|| self.client.retry_config());
        let http = self.client.http();

        let text = run_with_retry(cfg, |_attempt| {
            net::send_text(http.post(url.clone()).json(&payload))
        })
        .await?;

        let resp: TrackResponse = serde_json::from_str(&text)?;
        if !resp.success {
            let reason = match resp.error {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => text,
            };
            return Err(LcError::Rejected(reason));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(fbtrace_id = ?resp.fbtrace_id, "event accepted");

        Ok(TrackReceipt {
            event_id: self.event_id,
            fbtrace_id: resp.fbtrace_id,
            diagnostics: resp.diagnostics,
        })
    }
}

/// `PageView` for `page`.
pub fn page_view(client: &LcClient, page: &Url, user: UserData) -> EventBuilder {
    EventBuilder::new(client, EventKind::Standard, "PageView")
        .page(page)
        .user_data(user)
}

/// The custom form-filled event for the free analysis form on `page`.
pub fn form_filled(client: &LcClient, page: &Url, user: UserData) -> EventBuilder {
    EventBuilder::new(client, EventKind::Custom, FORM_FILLED_EVENT)
        .page(page)
        .user_data(user)
        .custom("content_name", "Formulário de Análise Gratuita")
        .custom("form_type", "landing_page_lead")
        .custom("source_page", page.path())
}

/// Standard `Lead` for a completed submission on `page`.
pub fn lead(client: &LcClient, page: &Url, user: UserData) -> EventBuilder {
    EventBuilder::new(client, EventKind::Standard, "Lead")
        .page(page)
        .user_data(user)
        .custom("content_name", "Formulário de Análise Gratuita")
}
