use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::model::UserData;

pub(crate) const ACTION_SOURCE: &str = "website";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackPayload<'a> {
    pub(crate) event_id: &'a str,
    pub(crate) user_data: WireUserData<'a>,
    pub(crate) custom_data: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) event_source_url: Option<&'a str>,
    pub(crate) url_parameters: &'a BTreeMap<String, String>,
    pub(crate) action_source: &'static str,
}

#[derive(Serialize)]
pub(crate) struct WireUserData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<[&'a str; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    em: Option<[&'a str; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ph: Option<[&'a str; 1]>,
    #[serde(rename = "fn", skip_serializing_if = "Option::is_none")]
    first_name: Option<[&'a str; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ln: Option<[&'a str; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fbc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fbp: Option<&'a str>,
}

fn one(v: Option<&String>) -> Option<[&str; 1]> {
    v.filter(|s| !s.is_empty()).map(|s| [s.as_str()])
}

impl<'a> WireUserData<'a> {
    /// `fbc` falls back to the raw click id from the page URL.
    pub(crate) fn new(user: &'a UserData, click_id: Option<&'a str>) -> Self {
        Self {
            external_id: one(user.external_id.as_ref()),
            em: one(user.em.as_ref()),
            ph: one(user.ph.as_ref()),
            first_name: one(user.first_name.as_ref()),
            ln: one(user.ln.as_ref()),
            fbc: user
                .fbc
                .as_deref()
                .filter(|s| !s.is_empty())
                .or(click_id),
            fbp: user.fbp.as_deref().filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct TrackResponse {
    #[serde(default)]
    pub(crate) success: bool,
    pub(crate) fbtrace_id: Option<String>,
    pub(crate) diagnostics: Option<Value>,
    pub(crate) error: Option<Value>,
}
