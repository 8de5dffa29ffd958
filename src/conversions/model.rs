use serde::Serialize;
use uuid::Uuid;

use crate::leads::Lead;
use crate::phone;

/// Standard events use Facebook's predefined names; custom events carry their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Standard,
    Custom,
}

/// Visitor identity sent along with conversion events.
///
/// The relay hashes `em`, `ph`, `fn` and `ln` before forwarding them to Facebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserData {
    /// Stable per-visitor id.
    pub external_id: Option<String>,
    /// E-mail, trimmed and lowercased.
    pub em: Option<String>,
    /// Phone digits.
    pub ph: Option<String>,
    /// First name.
    #[serde(rename = "fn")]
    pub first_name: Option<String>,
    /// Last name(s).
    pub ln: Option<String>,
    /// Click id cookie (`_fbc`) or the raw `fbclid`.
    pub fbc: Option<String>,
    /// Browser id cookie (`_fbp`).
    pub fbp: Option<String>,
}

impl UserData {
    /// Empty user data with a freshly generated `external_id`.
    pub fn with_external_id() -> Self {
        Self {
            external_id: Some(Uuid::new_v4().to_string()),
            ..Self::default()
        }
    }

    /// Copies identity fields out of a submitted form. Blank form fields leave data untouched.
    pub fn absorb_form(&mut self, lead: &Lead) {
        let email = lead.email.trim();
        if !email.is_empty() {
            self.em = Some(email.to_lowercase());
        }
        let ph = phone::digits(&lead.phone);
        if !ph.is_empty() {
            self.ph = Some(ph);
        }
        let mut parts = lead.name.split_whitespace();
        if let Some(first) = parts.next() {
            self.first_name = Some(first.to_string());
            let last = parts.collect::<Vec<_>>().join(" ");
            self.ln = (!last.is_empty()).then_some(last);
        }
    }
}

/// Relay acknowledgement for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackReceipt {
    /// The id the event was sent with; hand it to the browser pixel to deduplicate.
    pub event_id: String,
    pub fbtrace_id: Option<String>,
    pub diagnostics: Option<serde_json::Value>,
}
