use contracts::shared::mutation::{MutationResponse, RemoveRequest};
use contracts::system::departments::{Department, SaveDepartmentDto};

use crate::shared::data_table::TableError;
use crate::system::auth::gateway::{ApiGateway, HttpMethod};

/// Returns every department at once; the table pages it locally.
pub const LIST_ENDPOINT: &str = "/api/departments";

pub async fn save(
    gateway: &ApiGateway,
    dto: &SaveDepartmentDto,
) -> Result<MutationResponse, TableError> {
    TableError::require_fields(&[("name", &dto.name)])?;
    gateway
        .send_json(HttpMethod::Post, &format!("{}/save", LIST_ENDPOINT), dto)
        .await
}

/// Departments that still have members cannot be removed.
pub fn check_removable(department: &Department) -> Result<(), TableError> {
    if department.users_count > 0 {
        return Err(TableError::Guard(format!(
            "{} still has {} user(s). Move them first.",
            department.name, department.users_count
        )));
    }
    Ok(())
}

pub async fn remove(
    gateway: &ApiGateway,
    department: &Department,
) -> Result<MutationResponse, TableError> {
    check_removable(department)?;
    gateway
        .send_json(
            HttpMethod::Delete,
            &format!("{}/remove", LIST_ENDPOINT),
            &RemoveRequest { id: department.id },
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_removable() {
        let mut dep = Department {
            id: 1,
            name: "Sales".into(),
            description: None,
            users_count: 2,
        };
        assert_eq!(
            check_removable(&dep).unwrap_err().to_string(),
            "Sales still has 2 user(s). Move them first."
        );
        dep.users_count = 0;
        assert!(check_removable(&dep).is_ok());
    }
}
