//! WhatsApp existence checks through an Evolution API gateway.

mod api;
mod cache;
mod model;
mod wire;

pub use model::{CacheStats, ValidationResult, ValidationSource};

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::core::client::retry::run_with_retry;
use crate::core::{CacheMode, LcClient, LcError, RetryConfig};
use crate::phone::normalize;
use cache::ValidationCache;

/// Error text for input that does not contain a phone number.
pub const INVALID_NUMBER: &str = "invalid number";

/// Checks whether phone numbers have an active WhatsApp account.
///
/// Successful answers are cached per normalized number for the client's cache TTL (5 minutes
/// by default). Failed lookups are retried according to the retry policy (2 attempts, 1s apart
/// by default) and are never cached.
///
/// Clones share one cache; separately constructed validators do not. Concurrent validations of
/// the same uncached number each call the gateway.
///
/// # Example
///
/// ```no_run
/// # use lead_capture::{LcClient, WhatsAppValidator};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = LcClient::from_env()?;
/// let validator = WhatsAppValidator::new(&client)?;
///
/// let result = validator.validate("(11) 98765-4321").await;
/// if result.is_reachable() {
///     println!("{} is on WhatsApp", result.phone);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WhatsAppValidator {
    client: LcClient,
    cache: Arc<ValidationCache>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl WhatsAppValidator {
    /// Creates a validator with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`LcError::Config`] naming every missing Evolution setting.
    pub fn new(client: &LcClient) -> Result<Self, LcError> {
        client.evolution_endpoint()?;
        Ok(Self {
            client: client.clone(),
            cache: Arc::new(ValidationCache::new(client.validation_ttl())),
            cache_mode: CacheMode::Use,
            retry_override: None,
        })
    }

    /// Replaces the cache with an empty one using `ttl`.
    #[must_use]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = Arc::new(ValidationCache::new(ttl));
        self
    }

    /// How long a successful answer stays cached.
    pub fn ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Sets how lookups interact with the cache.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the client's default retry policy for this validator.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Validates one number. Never fails: every problem ends up in an unvalidated result.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn validate(&self, phone: &str) -> ValidationResult {
        let Some(normalized) = normalize(phone) else {
            return ValidationResult::failed(
                phone.to_string(),
                ValidationSource::Validation,
                INVALID_NUMBER,
            );
        };

        if self.cache_mode == CacheMode::Use
            && let Some(hit) = self.cache.get(&normalized).await
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(phone = %normalized, "cache hit");
            return hit;
        }

        let cfg = self
            .retry_override
            .as_ref()
            .unwrap_or_else(|| self.client.retry_config());
        let client = &self.client;
        let key = &normalized;
        let outcome = run_with_retry(cfg, move |_attempt| api::lookup(client, key)).await;

        match outcome {
            Ok((exists, jid)) => {
                let result = ValidationResult::confirmed(normalized.to_string(), exists, jid);
                if self.cache_mode != CacheMode::Bypass {
                    self.cache.put(normalized, result.clone()).await;
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(phone = %result.phone, exists = result.exists, "validated");
                result
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(phone = %normalized, error = %e, "validation failed");
                ValidationResult::failed(
                    normalized.to_string(),
                    ValidationSource::EvolutionApi,
                    e.to_string(),
                )
            }
        }
    }

    /// Validates several numbers concurrently. Results keep the input order.
    pub async fn validate_many<I, S>(&self, phones: I) -> Vec<ValidationResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks = phones.into_iter().map(|p| {
            let p: String = p.into();
            async move { self.validate(&p).await }
        });
        join_all(tasks).await
    }

    /// Drops every cached result.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        #[cfg(feature = "tracing")]
        tracing::debug!("validation cache cleared");
    }

    /// Counts cached entries without evicting anything.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}
