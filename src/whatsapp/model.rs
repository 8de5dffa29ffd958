use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a [`ValidationResult`] was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationSource {
    /// The Evolution API gateway answered (or was tried and failed).
    EvolutionApi,
    /// The input was rejected locally before any remote call.
    Validation,
}

/// Outcome of a WhatsApp existence check. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The normalized number, or the raw input when it could not be normalized.
    pub phone: String,
    /// Whether the number has an active WhatsApp account. Always `false` when not `validated`.
    pub exists: bool,
    /// WhatsApp JID reported by the gateway, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jid: Option<String>,
    /// `true` when the gateway gave a well-formed answer.
    pub validated: bool,
    /// When this result was produced.
    pub timestamp: DateTime<Utc>,
    /// Where the result came from.
    pub source: ValidationSource,
    /// Free-text failure reason for unvalidated results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub(crate) fn confirmed(phone: String, exists: bool, jid: Option<String>) -> Self {
        Self {
            phone,
            exists,
            jid,
            validated: true,
            timestamp: Utc::now(),
            source: ValidationSource::EvolutionApi,
            error: None,
        }
    }

    pub(crate) fn failed(phone: String, source: ValidationSource, error: impl Into<String>) -> Self {
        Self {
            phone,
            exists: false,
            jid: None,
            validated: false,
            timestamp: Utc::now(),
            source,
            error: Some(error.into()),
        }
    }

    /// The gateway confirmed an active WhatsApp account.
    pub fn is_reachable(&self) -> bool {
        self.validated && self.exists
    }
}

/// Snapshot of the validation cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// All stored entries, expired or not.
    pub total: usize,
    /// Entries still within their TTL.
    pub valid: usize,
    /// Entries past their TTL that have not been evicted yet.
    pub expired: usize,
}
