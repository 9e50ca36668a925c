use contracts::shared::mutation::{MutationResponse, RemoveRequest};
use contracts::system::users::{CreateUserDto, UpdateUserDto, USER_ROLES};
use std::collections::BTreeMap;

use crate::shared::data_table::TableError;
use crate::system::auth::gateway::{ApiGateway, HttpMethod};

pub const LIST_ENDPOINT: &str = "/api/users";
pub const EXPORT_ENDPOINT: &str = "/api/users/export";

pub const MIN_PASSWORD_LEN: usize = 8;

fn check_identity(name: &str, email: &str, role: &str) -> Result<(), TableError> {
    TableError::require_fields(&[("name", name), ("email", email), ("role", role)])?;
    let mut fields = BTreeMap::new();
    if !email.contains('@') {
        fields.insert("email".to_string(), "Enter a valid email address.".to_string());
    }
    if !USER_ROLES.contains(&role) {
        fields.insert("role".to_string(), "Unknown role.".to_string());
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(TableError::Validation {
            message: fields.values().cloned().collect::<Vec<_>>().join(" "),
            fields,
        })
    }
}

pub fn validate_create(dto: &CreateUserDto) -> Result<(), TableError> {
    check_identity(&dto.name, &dto.email, &dto.role)?;
    if dto.password.chars().count() < MIN_PASSWORD_LEN {
        let message = format!("Use at least {} characters.", MIN_PASSWORD_LEN);
        return Err(TableError::Validation {
            fields: BTreeMap::from([("password".to_string(), message.clone())]),
            message,
        });
    }
    Ok(())
}

pub fn validate_update(dto: &UpdateUserDto) -> Result<(), TableError> {
    check_identity(&dto.name, &dto.email, &dto.role)
}

pub async fn create(
    gateway: &ApiGateway,
    dto: &CreateUserDto,
) -> Result<MutationResponse, TableError> {
    validate_create(dto)?;
    gateway
        .send_json(HttpMethod::Post, &format!("{}/create", LIST_ENDPOINT), dto)
        .await
}

pub async fn update(
    gateway: &ApiGateway,
    id: i64,
    dto: &UpdateUserDto,
) -> Result<MutationResponse, TableError> {
    validate_update(dto)?;
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

    fn new_user() -> CreateUserDto {
        CreateUserDto {
            name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            password: "correct horse".into(),
            department: "Sales".into(),
            role: "manager".into(),
        }
    }

    #[test]
    fn test_create_validation() {
        assert!(validate_create(&new_user()).is_ok());

        let short = CreateUserDto {
            password: "1234567".into(),
            ..new_user()
        };
        assert!(validate_create(&short).unwrap_err().field_errors().contains_key("password"));

        let bad = CreateUserDto {
            email: "ann".into(),
            role: "owner".into(),
            ..new_user()
        };
        let fields = validate_create(&bad).unwrap_err().field_errors();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_update_needs_no_password() {
        let dto = UpdateUserDto {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            department: String::new(),
            role: "agent".into(),
            is_active: false,
        };
        assert!(validate_update(&dto).is_ok());
        let blank = UpdateUserDto {
            name: " ".into(),
            ..dto
        };
        assert_eq!(
            validate_update(&blank).unwrap_err().to_string(),
            "Please fill in: name"
        );
    }
}
