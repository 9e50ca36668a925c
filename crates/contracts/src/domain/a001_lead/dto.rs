use serde::{Deserialize, Serialize};

/// Lead row as returned by `GET /api/leads`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadDto {
    pub id: i64,
    #[serde(default)]
    pub lead_name: Option<String>,
    #[serde(default)]
    pub lead_email: Option<String>,
    #[serde(default)]
    pub lead_phone: Option<String>,
    /// Shown as "site name" in the table.
    #[serde(default)]
    pub lead_website: Option<String>,
    #[serde(default)]
    pub campaign: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Lead lifecycle states offered as row-level transitions.
pub const LEAD_STATUSES: [&str; 4] = ["new", "contacted", "qualified", "closed"];

/// Body of `PUT /api/leads/update/:id` for a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadStatusUpdateDto {
    pub status: String,
}
