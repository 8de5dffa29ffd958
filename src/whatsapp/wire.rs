use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(crate) struct LookupRequest<'a> {
    pub(crate) numbers: [&'a str; 1],
}

#[derive(Deserialize)]
pub(crate) struct NumberStatus {
    #[serde(default)]
    pub(crate) exists: Option<bool>,
    #[serde(default)]
    pub(crate) jid: Option<String>,
}
