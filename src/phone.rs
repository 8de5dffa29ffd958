//! Brazilian phone number normalization and input masking.

use serde::Serialize;
use std::fmt;

const COUNTRY_CODE: &str = "55";
const MOBILE_PREFIX: char = '9';

/// A phone number in international form: `+` followed by country code and subscriber digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// The full `+<digits>` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digits without the leading `+`.
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Removes everything that is not an ASCII digit.
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Normalizes a raw phone string into international form.
///
/// Rules, applied to the digits of `raw`:
/// - 11 digits (area code + 9-digit mobile): country code is prefixed;
/// - 10 digits (area code + 8-digit legacy mobile): the mobile `9` is prepended, then the
///   country code;
/// - 13 digits starting with `55`: already international;
/// - 12 digits not starting with `55`: country code is prefixed;
/// - any other non-empty digit string passes through unchanged.
///
/// Returns `None` when `raw` contains no digits at all.
///
/// ```
/// use lead_capture::phone::normalize;
///
/// assert_eq!(normalize("(11) 98765-4321").unwrap().as_str(), "+5511987654321");
/// assert_eq!(normalize("11 8765-4321").unwrap().as_str(), "+5591187654321");
/// assert!(normalize("n/a").is_none());
/// ```
pub fn normalize(raw: &str) -> Option<PhoneNumber> {
    let d = digits(raw);
    let normalized = match d.len() {
        0 => return None,
        11 => format!("{COUNTRY_CODE}{d}"),
        10 => format!("{COUNTRY_CODE}{MOBILE_PREFIX}{d}"),
        12 if !d.starts_with(COUNTRY_CODE) => format!("{COUNTRY_CODE}{d}"),
        _ => d,
    };
    Some(PhoneNumber(format!("+{normalized}")))
}

/// Formats a partially typed number for display: `11987654321` becomes `11 98765-4321`.
///
/// A space follows the two-digit area code once a third digit is typed; a hyphen is placed
/// before the last four digits once at least five digits follow the area code.
pub fn mask(raw: &str) -> String {
    let d = digits(raw);
    if d.len() < 3 {
        return d;
    }
    let (area, rest) = d.split_at(2);
    if rest.len() < 5 {
        return format!("{area} {rest}");
    }
    let (head, tail) = rest.split_at(rest.len() - 4);
    format!("{area} {head}-{tail}")
}

/// Whether `raw` has the 10 or 11 digits of a local number with area code.
pub fn is_local_length(raw: &str) -> bool {
    matches!(digits(raw).len(), 10 | 11)
}
