use serde::{Deserialize, Serialize};

/// Spam-filter rule as returned by `GET /api/spam-rules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpamRuleDto {
    pub id: i64,
    /// One of [`SPAM_RULE_TYPES`].
    pub rule_type: String,
    pub value: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub hits: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

pub const SPAM_RULE_TYPES: [&str; 4] = ["email", "domain", "ip", "keyword"];

/// Body of `POST /api/spam-rules/save`. A missing id creates a new rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSpamRuleDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub rule_type: String,
    pub value: String,
    pub is_active: bool,
}
