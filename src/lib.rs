//! lead-capture: async client for the back half of a landing page lead funnel.
//!
//! - [`phone`]: Brazilian number normalization and input masking.
//! - [`whatsapp`]: WhatsApp existence checks via an Evolution API gateway, cached and retried.
//! - [`leads`]: lead storage in an Airtable table.
//! - [`conversions`]: Facebook Conversions API events with pixel deduplication ids.
//! - [`attribution`]: UTM and click id capture from page URLs.
//! - [`funnel`]: the submit step tying these together.

pub mod attribution;
pub mod conversions;
pub mod core;
pub mod funnel;
pub mod leads;
pub mod phone;
pub mod whatsapp;

pub use attribution::UtmParams;
pub use conversions::{EventBuilder, EventKind, TrackReceipt, UserData};
pub use crate::core::client::Backoff;
pub use crate::core::{CacheMode, LcClient, LcClientBuilder, LcError, RetryConfig, Settings};
pub use funnel::{Submission, submit_lead};
pub use leads::{Lead, LeadBuilder, LeadRecord};
pub use phone::PhoneNumber;
pub use whatsapp::{CacheStats, ValidationResult, ValidationSource, WhatsAppValidator};
