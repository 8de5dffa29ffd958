//! Core components of the `lead-capture` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`LcClient`] and its builder.
//! - The primary [`LcError`] type.
//! - [`Settings`] read from the environment.
//! - Retry/cache policies and internal networking helpers.

/// The main client (`LcClient`), builder, and retry configuration.
pub mod client;
/// Endpoint and credential settings.
pub mod config;
/// The primary error type (`LcError`) for the crate.
pub mod error;
#[cfg(feature = "tracing-subscriber")]
mod logging;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::LcClient`
pub use client::{CacheMode, LcClient, LcClientBuilder, RetryConfig};
pub use config::Settings;
pub use error::LcError;
#[cfg(feature = "tracing-subscriber")]
pub use logging::init_tracing;
