use serde::{Deserialize, Serialize};

/// Body of `DELETE <resource>/remove`. Several endpoints take the id in the
/// body rather than in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRequest {
    pub id: i64,
}

/// Generic acknowledgement returned by create/save/update/remove endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}
