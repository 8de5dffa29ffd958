use serde_json::Value;

use super::wire::{LookupRequest, NumberStatus};
use crate::core::{LcClient, LcError, net};
use crate::phone::PhoneNumber;

/// One remote lookup: `(exists, jid)` for `phone`.
pub(super) async fn lookup(
    client: &LcClient,
    phone: &PhoneNumber,
) -> Result<(bool, Option<String>), LcError> {
    let (url, key) = client.evolution_endpoint()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(url = %url, phone = %phone, "calling evolution api");

    let req = client
        .http()
        .post(url)
        .header("apikey", key)
        .json(&LookupRequest {
            numbers: [phone.as_str()],
        });

    let body = net::send_text(req).await?;
    parse_lookup(&body)
}

fn parse_lookup(body: &str) -> Result<(bool, Option<String>), LcError> {
    let value: Value = serde_json::from_str(body)?;
    let first = match value {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        _ => return Err(LcError::Data("invalid or empty lookup response".into())),
    };
    let status: NumberStatus = serde_json::from_value(first)
        .map_err(|e| LcError::Data(format!("lookup entry: {e}")))?;

    let jid = status.jid.filter(|j| !j.is_empty());
    Ok((status.exists.unwrap_or(false), jid))
}
