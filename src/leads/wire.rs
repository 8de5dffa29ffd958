use serde::{Deserialize, Serialize};

use super::model::Lead;
use crate::attribution::UtmParams;

#[derive(Serialize)]
pub(crate) struct CreateRecord<'a> {
    pub(crate) fields: LeadFields<'a>,
}

#[derive(Serialize)]
pub(crate) struct LeadFields<'a> {
    #[serde(rename = "Nome do lead")]
    name: &'a str,
    #[serde(rename = "Telefone do lead")]
    phone: &'a str,
    #[serde(rename = "Email do lead")]
    email: &'a str,
    utm_source: &'a str,
    utm_medium: &'a str,
    utm_campaign: &'a str,
    utm_term: &'a str,
    utm_content: &'a str,
}

impl<'a> LeadFields<'a> {
    pub(crate) fn new(lead: &'a Lead, utm: &'a UtmParams) -> Self {
        Self {
            name: &lead.name,
            phone: &lead.phone,
            email: &lead.email,
            utm_source: &utm.utm_source,
            utm_medium: &utm.utm_medium,
            utm_campaign: &utm.utm_campaign,
            utm_term: &utm.utm_term,
            utm_content: &utm.utm_content,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordEnvelope {
    pub(crate) id: Option<String>,
    pub(crate) created_time: Option<String>,
}
