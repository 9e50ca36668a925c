use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Validation messages for one field: backends send either a list or a
/// single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldMessages {
    Many(Vec<String>),
    One(String),
}

impl FieldMessages {
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldMessages::Many(v) => v.iter().map(String::as_str).find(|m| !m.is_empty()),
            FieldMessages::One(s) if !s.is_empty() => Some(s.as_str()),
            FieldMessages::One(_) => None,
        }
    }

    pub fn joined(&self) -> String {
        match self {
            FieldMessages::Many(v) => v.join(" "),
            FieldMessages::One(s) => s.clone(),
        }
    }
}

/// JSON body of a non-2xx response.
///
/// `{ "message": "...", "error": "...", "errors": { "email": ["taken"] } }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Usually a string, occasionally an object; only strings are surfaced.
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub errors: BTreeMap<String, FieldMessages>,
}

impl ApiErrorBody {
    /// Field name → message map for inline form display.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, msgs)| (field.clone(), msgs.joined()))
            .filter(|(_, msg)| !msg.is_empty())
            .collect()
    }

    /// Most specific message available: first field-level message, then
    /// `message`, then a string `error`.
    pub fn best_message(&self) -> Option<String> {
        self.errors
            .values()
            .find_map(|m| m.first().map(str::to_string))
            .or_else(|| self.message.clone().filter(|m| !m.is_empty()))
            .or_else(|| {
                self.error
                    .as_ref()
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
            })
    }
}
