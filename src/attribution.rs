//! Campaign attribution read from landing page URLs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Query parameter Facebook appends to ad clicks.
pub const CLICK_ID_PARAM: &str = "fbclid";

/// The five standard UTM parameters. Missing ones are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: String,
    pub utm_content: String,
}

impl UtmParams {
    /// Reads UTM parameters from a page URL.
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs())
    }

    /// Reads UTM parameters from a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    {
        let mut found: [Option<String>; 5] = Default::default();
        for (k, v) in pairs {
            let idx = match &*k {
                "utm_source" => 0,
                "utm_medium" => 1,
                "utm_campaign" => 2,
                "utm_term" => 3,
                "utm_content" => 4,
                _ => continue,
            };
            // First occurrence wins even when empty, like URLSearchParams.get.
            found[idx].get_or_insert_with(|| v.into_owned());
        }
        let [utm_source, utm_medium, utm_campaign, utm_term, utm_content] =
            found.map(Option::unwrap_or_default);
        Self {
            utm_source,
            utm_medium,
            utm_campaign,
            utm_term,
            utm_content,
        }
    }
}

/// Every query parameter of `url`. A repeated key keeps its last value.
pub fn url_parameters(url: &Url) -> BTreeMap<String, String> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// The ad click id (`fbclid`), if the visitor arrived from an ad.
pub fn click_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == CLICK_ID_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
