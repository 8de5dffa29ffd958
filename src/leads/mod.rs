//! Lead storage in an Airtable table.

mod model;
mod wire;

pub use model::{Lead, LeadRecord};

use chrono::{DateTime, Utc};

use crate::attribution::UtmParams;
use crate::core::client::retry::run_with_retry;
use crate::core::{LcClient, LcError, RetryConfig, net};
use wire::{CreateRecord, LeadFields, RecordEnvelope};

/// A builder for storing one lead as a new table row.
///
/// Record creation is not idempotent, so a single attempt is made unless a retry policy is
/// set explicitly.
pub struct LeadBuilder {
    client: LcClient,
    lead: Lead,
    utm: UtmParams,
    retry_override: Option<RetryConfig>,
}

impl LeadBuilder {
    /// Creates a new `LeadBuilder` for `lead` with empty attribution.
    pub fn new(client: &LcClient, lead: Lead) -> Self {
        Self {
            client: client.clone(),
            lead,
            utm: UtmParams::default(),
            retry_override: None,
        }
    }

    /// Attaches the campaign attribution the visitor arrived with.
    #[must_use]
    pub fn utm(mut self, utm: UtmParams) -> Self {
        self.utm = utm;
        self
    }

    /// Enables retries for this call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Creates the record.
    ///
    /// # Errors
    ///
    /// Returns [`LcError::Config`] when the table is not configured, [`LcError::Status`] on a
    /// non-2xx answer, and [`LcError::Data`] when the answer carries no record id.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn send(self) -> Result<LeadRecord, LcError> {
        let (url, token) = self.client.airtable_endpoint()?;
        let cfg = self
            .retry_override
            .unwrap_or_else(RetryConfig::single_attempt);

        let body = CreateRecord {
            fields: LeadFields::new(&self.lead, &self.utm),
        };
        let http = self.client.http();

        let text = run_with_retry(&cfg, |_attempt| {
            net::send_text(http.post(url.clone()).bearer_auth(token).json(&body))
        })
        .await?;

        let record = parse_record(&text)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(record = %record.id, "lead stored");
        Ok(record)
    }
}

fn parse_record(body: &str) -> Result<LeadRecord, LcError> {
    let env: RecordEnvelope = serde_json::from_str(body)?;
    let id = env
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| LcError::Data("record response without id".into()))?;
    let created_time = env
        .created_time
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.with_timezone(&Utc));
    Ok(LeadRecord { id, created_time })
}
