use contracts::domain::a002_contact::dto::ContactFormDto;
use contracts::shared::mutation::{MutationResponse, RemoveRequest};
use std::collections::BTreeMap;

use crate::shared::data_table::TableError;
use crate::system::auth::gateway::{ApiGateway, HttpMethod};

pub const LIST_ENDPOINT: &str = "/api/contacts";
pub const EXPORT_ENDPOINT: &str = "/api/contacts/export";

/// Client-side checks run before create and update.
pub fn validate(dto: &ContactFormDto) -> Result<(), TableError> {
    TableError::require_fields(&[("first_name", &dto.first_name), ("email", &dto.email)])?;
    if !dto.email.contains('@') {
        let message = "Enter a valid email address.".to_string();
        return Err(TableError::Validation {
            fields: BTreeMap::from([("email".to_string(), message.clone())]),
            message,
        });
    }
    Ok(())
}

pub async fn create(
    gateway: &ApiGateway,
    dto: &ContactFormDto,
) -> Result<MutationResponse, TableError> {
    validate(dto)?;
    gateway
        .send_json(HttpMethod::Post, &format!("{}/create", LIST_ENDPOINT), dto)
        .await
}

pub async fn update(
    gateway: &ApiGateway,
    id: i64,
    dto: &ContactFormDto,
) -> Result<MutationResponse, TableError> {
    validate(dto)?;
    gateway
        .send_json(HttpMethod::Put, &format!("{}/update/{}", LIST_ENDPOINT, id), dto)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_name_and_email() {
        let err = validate(&ContactFormDto::default()).unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("email"));

        let dto = ContactFormDto {
            first_name: "Ann".into(),
            email: "ann.example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            validate(&dto).unwrap_err().field_errors().get("email").map(String::as_str),
            Some("Enter a valid email address.")
        );

        let dto = ContactFormDto {
            email: "ann@example.com".into(),
            ..dto
        };
        assert!(validate(&dto).is_ok());
    }
}
