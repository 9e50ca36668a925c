use contracts::domain::a001_lead::dto::{LeadStatusUpdateDto, LEAD_STATUSES};
use contracts::shared::mutation::{MutationResponse, RemoveRequest};

use crate::shared::data_table::TableError;
use crate::system::auth::gateway::{ApiGateway, HttpMethod};

pub const LIST_ENDPOINT: &str = "/api/leads";
pub const EXPORT_ENDPOINT: &str = "/api/leads/export";

/// Rejects a status the backend does not know before any request is made.
pub fn check_status(status: &str) -> Result<(), TableError> {
    if LEAD_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(TableError::Guard(format!("Unknown lead status `{}`", status)))
    }
}

/// `PUT /api/leads/update/:id` with the new status.
pub async fn update_status(
    gateway: &ApiGateway,
    id: i64,
    status: &str,
) -> Result<MutationResponse, TableError> {
    check_status(status)?;
    let body = LeadStatusUpdateDto {
        status: status.to_string(),
    };
    gateway
        .send_json(HttpMethod::Put, &format!("{}/update/{}", LIST_ENDPOINT, id), &body)
        .await
}

pub async fn remove(gateway: &ApiGateway, id: i64) -> Result<MutationResponse, TableError> {
    gateway
        .send_json(
            HttpMethod::Delete,
            &format!("{}/remove", LIST_ENDPOINT),
            &RemoveRequest { id },
        )
        .await
}
