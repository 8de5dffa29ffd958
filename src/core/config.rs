//! Endpoint and credential settings, read from the environment.

use std::fmt;

/// Placeholder left in deploy configs for values nobody filled in.
const PLACEHOLDER: &str = "CONFIGURE_NO_NETLIFY";
/// Marker used by template values such as `URL_DA_SUA_API_AQUI`.
const TEMPLATE_MARKER: &str = "_AQUI";

/// Keys whose absence makes the funnel unusable.
pub const CRITICAL_KEYS: [&str; 2] = ["API_BASE_URL", "EVOLUTION_API_KEY"];

/// Every setting the crate knows about.
///
/// Values are kept as raw strings; URL parsing happens when a [`crate::LcClient`] is built.
/// `Debug` output redacts every key and token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Root of the Facebook Conversions API relay.
    pub api_base_url: Option<String>,
    /// Root of the Evolution API gateway (with trailing slash).
    pub evolution_api_url: Option<String>,
    /// Evolution instance identifier.
    pub evolution_instance_id: Option<String>,
    /// Evolution API key, sent as the `apikey` header.
    pub evolution_api_key: Option<String>,
    /// Airtable personal access token.
    pub airtable_api_key: Option<String>,
    /// Airtable base id (`app...`).
    pub airtable_base_id: Option<String>,
    /// Airtable table id (`tbl...`).
    pub airtable_table_id: Option<String>,
}

impl Settings {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// Values that are empty, equal to the deploy placeholder, or still contain a template
    /// marker are treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| is_configured(v));
        Self {
            api_base_url: get("API_BASE_URL"),
            evolution_api_url: get("EVOLUTION_API_URL"),
            evolution_instance_id: get("EVOLUTION_INSTANCE_ID"),
            evolution_api_key: get("EVOLUTION_API_KEY"),
            airtable_api_key: get("AIRTABLE_API_KEY"),
            airtable_base_id: get("AIRTABLE_BASE_ID"),
            airtable_table_id: get("AIRTABLE_TABLE_ID"),
        }
    }

    /// Fills every absent field from `other`, keeping the ones already set.
    pub(crate) fn fill_missing(&mut self, other: &Settings) {
        fn fill(slot: &mut Option<String>, value: &Option<String>) {
            if slot.is_none() {
                slot.clone_from(value);
            }
        }
        fill(&mut self.api_base_url, &other.api_base_url);
        fill(&mut self.evolution_api_url, &other.evolution_api_url);
        fill(&mut self.evolution_instance_id, &other.evolution_instance_id);
        fill(&mut self.evolution_api_key, &other.evolution_api_key);
        fill(&mut self.airtable_api_key, &other.airtable_api_key);
        fill(&mut self.airtable_base_id, &other.airtable_base_id);
        fill(&mut self.airtable_table_id, &other.airtable_table_id);
    }

    /// Names of the critical keys that are not configured.
    pub fn missing_critical(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_base_url.is_none() {
            missing.push(CRITICAL_KEYS[0]);
        }
        if self.evolution_api_key.is_none() {
            missing.push(CRITICAL_KEYS[1]);
        }
        missing
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_base_url", &self.api_base_url)
            .field("evolution_api_url", &self.evolution_api_url)
            .field("evolution_instance_id", &self.evolution_instance_id)
            .field("evolution_api_key", &self.evolution_api_key.as_deref().map(redact))
            .field("airtable_api_key", &self.airtable_api_key.as_deref().map(redact))
            .field("airtable_base_id", &self.airtable_base_id)
            .field("airtable_table_id", &self.airtable_table_id)
            .finish()
    }
}

pub(crate) fn is_configured(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v != PLACEHOLDER && !v.contains(TEMPLATE_MARKER)
}

/// Masks a secret down to its last four characters: `********abcd`.
pub fn redact(secret: &str) -> String {
    let tail: String = {
        let chars: Vec<char> = secret.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect()
    };
    format!("{}{tail}", "*".repeat(8))
}
