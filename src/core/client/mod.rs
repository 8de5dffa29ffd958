//! Public client surface + builder.
//! Internals are split into `constants` (UA + defaults) and `retry` (attempt policy).

mod constants;
/// Retry and cache policies shared by every remote call.
pub mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::LcError;
use crate::core::config::{Settings, is_configured, redact};
use constants::{DEFAULT_AIRTABLE_BASE, DEFAULT_VALIDATION_TTL, USER_AGENT};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Configured HTTP client plus the endpoints and credentials of every service.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct LcClient {
    http: Client,

    conversions_base: Option<Url>,

    evolution_base: Option<Url>,
    evolution_instance: Option<String>,
    evolution_key: Option<String>,

    airtable_base: Url,
    airtable_key: Option<String>,
    airtable_base_id: Option<String>,
    airtable_table_id: Option<String>,

    validation_ttl: Duration,
    retry: RetryConfig,
}

impl fmt::Debug for LcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LcClient")
            .field("conversions_base", &self.conversions_base.as_ref().map(Url::as_str))
            .field("evolution_base", &self.evolution_base.as_ref().map(Url::as_str))
            .field("evolution_instance", &self.evolution_instance)
            .field("evolution_key", &self.evolution_key.as_deref().map(redact))
            .field("airtable_base", &self.airtable_base.as_str())
            .field("airtable_key", &self.airtable_key.as_deref().map(redact))
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_table_id", &self.airtable_table_id)
            .field("validation_ttl", &self.validation_ttl)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl LcClient {
    /// Create a new builder.
    pub fn builder() -> LcClientBuilder {
        LcClientBuilder::default()
    }

    /// Build a client from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured URL does not parse or the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, LcError> {
        Self::builder().settings(&Settings::from_env()).build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub(crate) fn validation_ttl(&self) -> Duration {
        self.validation_ttl
    }

    /// The Evolution lookup endpoint for the configured instance, plus its API key.
    pub(crate) fn evolution_endpoint(&self) -> Result<(Url, &str), LcError> {
        match (&self.evolution_base, &self.evolution_instance, &self.evolution_key) {
            (Some(base), Some(instance), Some(key)) => {
                let url = base.join(&format!("chat/whatsappNumbers/{instance}"))?;
                Ok((url, key.as_str()))
            }
            _ => {
                let mut missing = Vec::new();
                if self.evolution_base.is_none() {
                    missing.push("EVOLUTION_API_URL");
                }
                if self.evolution_instance.is_none() {
                    missing.push("EVOLUTION_INSTANCE_ID");
                }
                if self.evolution_key.is_none() {
                    missing.push("EVOLUTION_API_KEY");
                }
                Err(LcError::Config(missing.join(", ")))
            }
        }
    }

    /// The Airtable table endpoint, plus its bearer token.
    pub(crate) fn airtable_endpoint(&self) -> Result<(Url, &str), LcError> {
        match (&self.airtable_key, &self.airtable_base_id, &self.airtable_table_id) {
            (Some(key), Some(base_id), Some(table_id)) => {
                let url = self.airtable_base.join(&format!("v0/{base_id}/{table_id}"))?;
                Ok((url, key.as_str()))
            }
            _ => {
                let mut missing = Vec::new();
                if self.airtable_key.is_none() {
                    missing.push("AIRTABLE_API_KEY");
                }
                if self.airtable_base_id.is_none() {
                    missing.push("AIRTABLE_BASE_ID");
                }
                if self.airtable_table_id.is_none() {
                    missing.push("AIRTABLE_TABLE_ID");
                }
                Err(LcError::Config(missing.join(", ")))
            }
        }
    }

    /// The conversions relay endpoint for a path such as `api/track/lead`.
    pub(crate) fn conversions_endpoint(&self, path: &str) -> Result<Url, LcError> {
        let base = self
            .conversions_base
            .as_ref()
            .ok_or_else(|| LcError::Config("API_BASE_URL".into()))?;
        Ok(base.join(path)?)
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct LcClientBuilder {
    settings: Settings,
    user_agent: Option<String>,

    conversions_base: Option<Url>,
    evolution_base: Option<Url>,
    airtable_base: Option<Url>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl LcClientBuilder {
    /// Apply configured values from `settings`.
    ///
    /// Only fields not yet set on this builder are taken, so explicit setters win whether they
    /// are called before or after this, and an earlier `settings` call wins over a later one.
    #[must_use]
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.settings.fill_missing(settings);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the conversions relay root (e.g., `https://relay.example.com/`).
    #[must_use]
    pub fn conversions_base(mut self, url: Url) -> Self {
        self.conversions_base = Some(url);
        self
    }

    /// Override the Evolution API root (e.g., `https://evo.example.com/`).
    #[must_use]
    pub fn evolution_base(mut self, url: Url) -> Self {
        self.evolution_base = Some(url);
        self
    }

    /// Set the Evolution instance id and API key.
    #[must_use]
    pub fn evolution_credentials(
        mut self,
        instance_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        self.settings.evolution_instance_id = Some(instance_id.into());
        self.settings.evolution_api_key = Some(api_key.into());
        self
    }

    /// Override the Airtable API root. Default: `https://api.airtable.com/`.
    #[must_use]
    pub fn airtable_base(mut self, url: Url) -> Self {
        self.airtable_base = Some(url);
        self
    }

    /// Set the Airtable token and target table.
    #[must_use]
    pub fn airtable_table(
        mut self,
        api_key: impl Into<String>,
        base_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        self.settings.airtable_api_key = Some(api_key.into());
        self.settings.airtable_base_id = Some(base_id.into());
        self.settings.airtable_table_id = Some(table_id.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Lifetime of cached WhatsApp validations. Default: 5 minutes.
    #[must_use]
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Default retry policy for WhatsApp lookups. Default: 2 attempts, 1s apart.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured URL does not parse or the HTTP client cannot be built.
    pub fn build(self) -> Result<LcClient, LcError> {
        let settings = self.settings;

        let conversions_base = match self.conversions_base {
            Some(u) => Some(u),
            None => settings.api_base_url.as_deref().map(Url::parse).transpose()?,
        };
        let evolution_base = match self.evolution_base {
            Some(u) => Some(u),
            None => settings.evolution_api_url.as_deref().map(Url::parse).transpose()?,
        };
        let airtable_base = self
            .airtable_base
            .map_or_else(|| Url::parse(DEFAULT_AIRTABLE_BASE), Ok)?;

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }
        let http = httpb.build()?;

        let keep = |v: Option<String>| v.filter(|s| is_configured(s));

        Ok(LcClient {
            http,
            conversions_base: conversions_base.map(as_directory),
            evolution_base: evolution_base.map(as_directory),
            evolution_instance: keep(settings.evolution_instance_id),
            evolution_key: keep(settings.evolution_api_key),
            airtable_base: as_directory(airtable_base),
            airtable_key: keep(settings.airtable_api_key),
            airtable_base_id: keep(settings.airtable_base_id),
            airtable_table_id: keep(settings.airtable_table_id),
            validation_ttl: self.cache_ttl.unwrap_or(DEFAULT_VALIDATION_TTL),
            retry: self.retry.unwrap_or_default(),
        })
    }
}

/// Ensures the path ends in `/` so that `Url::join` appends instead of replacing the last segment.
fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
