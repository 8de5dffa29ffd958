//! Centralized constants for default endpoints, UA and cache policy.

use std::time::Duration;

/// User-Agent sent with every request.
pub(crate) const USER_AGENT: &str = concat!("lead-capture/", env!("CARGO_PKG_VERSION"));

/// Airtable REST API root (`v0/{base}/{table}` is appended).
pub(crate) const DEFAULT_AIRTABLE_BASE: &str = "https://api.airtable.com/";

/// How long a successful WhatsApp validation stays cached.
pub(crate) const DEFAULT_VALIDATION_TTL: Duration = Duration::from_secs(5 * 60);
