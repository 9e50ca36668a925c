use contracts::shared::api_error::ApiErrorBody;
use std::collections::BTreeMap;
use thiserror::Error;

pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Every failure a table page can surface. Errors never propagate past the
/// call site: they end up as a banner, inline form errors or a toast.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("The request timed out")]
    Timeout,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// Client-side check failed before any request was sent.
    #[error("{0}")]
    Guard(String),

    #[error("Your session has expired. Please sign in again.")]
    SessionExpired,

    #[error("You are not signed in")]
    Unauthorized,

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Table configuration error: {0}")]
    Config(String),
}

impl TableError {
    /// Builds an error from a non-2xx response body.
    ///
    /// Message precedence: field-level validation message, `message`,
    /// `error`, the transport-level description, then [`FALLBACK_MESSAGE`].
    pub fn from_response(status: u16, body: &str, exception: Option<&str>) -> Self {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).unwrap_or_default();
        let fields = parsed.field_errors();
        if !fields.is_empty() {
            let message = fields.values().cloned().collect::<Vec<_>>().join(" ");
            return TableError::Validation { message, fields };
        }
        let message = parsed
            .best_message()
            .or_else(|| {
                exception
                    .filter(|e| !e.trim().is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        TableError::Server { status, message }
    }

    /// Fails with a [`TableError::Validation`] naming every blank field.
    pub fn require_fields(fields: &[(&str, &str)]) -> Result<(), TableError> {
        let missing: BTreeMap<String, String> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| (name.to_string(), "This field is required.".to_string()))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        let names = missing.keys().cloned().collect::<Vec<_>>().join(", ");
        Err(TableError::Validation {
            message: format!("Please fill in: {}", names),
            fields: missing,
        })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TableError::Timeout)
    }

    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            TableError::Validation { fields, .. } => fields.clone(),
            _ => BTreeMap::new(),
        }
    }
}
