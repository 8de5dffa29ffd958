use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact details captured by the landing page form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Lead {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// A stored lead row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    /// Airtable record id (`rec...`).
    pub id: String,
    pub created_time: Option<DateTime<Utc>>,
}
