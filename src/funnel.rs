//! The submit step of the lead form: validated phone, conversion event, stored lead.

use serde::Serialize;
use url::Url;

use crate::attribution::UtmParams;
use crate::conversions::{self, TrackReceipt, UserData};
use crate::core::{LcClient, LcError};
use crate::leads::{Lead, LeadBuilder, LeadRecord};
use crate::whatsapp::ValidationResult;

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub record: LeadRecord,
    /// The `Lead` conversion event, or `None` if the relay could not be reached.
    pub event: Option<TrackReceipt>,
}

/// Submits a lead whose phone number passed the WhatsApp check.
///
/// The `Lead` conversion event is fired first; its failure is logged and does not stop the
/// submission. The lead is then stored with the attribution read from `page`.
///
/// # Errors
///
/// Returns [`LcError::NotValidated`] unless `validation` confirmed an active WhatsApp account,
/// and any error from storing the lead.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, err))]
pub async fn submit_lead(
    client: &LcClient,
    validation: &ValidationResult,
    lead: Lead,
    page: &Url,
    mut user: UserData,
) -> Result<Submission, LcError> {
    if !validation.is_reachable() {
        let reason = validation
            .error
            .clone()
            .unwrap_or_else(|| "no WhatsApp account".to_string());
        return Err(LcError::NotValidated(format!("{}: {reason}", validation.phone)));
    }

    user.absorb_form(&lead);
    let event = match conversions::lead(client, page, user).send().await {
        Ok(receipt) => Some(receipt),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "lead event not delivered");
            None
        }
    };

    let record = LeadBuilder::new(client, lead)
        .utm(UtmParams::from_url(page))
        .send()
        .await?;

    Ok(Submission { record, event })
}
