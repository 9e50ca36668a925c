use contracts::shared::list_query::SortDirection;
use contracts::system::users::{UpdateUserDto, User};

use crate::shared::config::AppConfig;
use crate::shared::data_table::row::opt;
use crate::shared::data_table::{
    ClearPolicy, ColumnDef, Envelope, FilterValue, ListFormat, SortMap, SortState, TableFilters,
    TableRow, TableSpec,
};
use crate::shared::date_utils::format_datetime;
use crate::system::users::api::{EXPORT_ENDPOINT, LIST_ENDPOINT};

pub const PAGE_ID: &str = "users";

pub const DEPARTMENT_OPTIONS: &str = "departments";

pub const FILTER_LABELS: &[(&str, &str)] = &[
    ("role", "Role"),
    ("department", "Department"),
    ("is_active", "Active"),
];

pub fn table_spec(config: &AppConfig) -> TableSpec {
    TableSpec {
        page_id: PAGE_ID,
        endpoint: LIST_ENDPOINT,
        export_endpoint: Some(EXPORT_ENDPOINT),
        envelope: Envelope::NestedData,
        list_format: ListFormat::Comma,
        clear_policy: ClearPolicy::Omit,
        columns: vec![
            ColumnDef::row_number(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("email", "Email").sortable(),
            ColumnDef::new("department", "Department").sortable(),
            ColumnDef::new("role", "Role").sortable(),
            ColumnDef::new("is_active", "Status").sortable(),
            ColumnDef::new("last_login_at", "Last login").sortable(),
            ColumnDef::new("created_at", "Created").sortable(),
            ColumnDef::actions(),
        ],
        default_visible: vec![
            "row_number",
            "name",
            "email",
            "department",
            "role",
            "is_active",
            "last_login_at",
            "actions",
        ],
        sort_map: SortMap::new(&[
            ("name", "name"),
            ("email", "email"),
            ("department", "department_name"),
            ("role", "role"),
            ("is_active", "is_active"),
            ("last_login_at", "last_login_at"),
            ("created_at", "created_at"),
        ]),
        default_sort: SortState::by("name", SortDirection::Asc),
        page_sizes: config.table.page_sizes.clone(),
        default_per_page: config.table.default_per_page,
        static_options: Default::default(),
    }
}

impl TableRow for User {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "department" => opt(&self.department),
            "role" => opt(&self.role),
            "is_active" => (if self.is_active { "Active" } else { "Blocked" }).to_string(),
            "last_login_at" => self
                .last_login_at
                .as_deref()
                .map(format_datetime)
                .unwrap_or_else(|| "-".to_string()),
            "created_at" => format_datetime(&opt(&self.created_at)),
            _ => String::new(),
        }
    }
}

pub fn form_from(user: &User) -> UpdateUserDto {
    UpdateUserDto {
        name: user.name.clone(),
        email: user.email.clone(),
        department: opt(&user.department),
        role: opt(&user.role),
        is_active: user.is_active,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilters {
    pub roles: Vec<String>,
    pub departments: Vec<String>,
    /// `""`, `"1"` or `"0"`.
    pub is_active: String,
}

impl TableFilters for UserFilters {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        vec![
            ("role", FilterValue::multi(&self.roles)),
            ("department", FilterValue::multi(&self.departments)),
            ("is_active", FilterValue::scalar(&self.is_active)),
        ]
    }

    fn clear_key(&mut self, key: &str) {
        match key {
            "role" => self.roles.clear(),
            "department" => self.departments.clear(),
            "is_active" => self.is_active.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;
    use serde_json::json;

    #[test]
    fn test_spec_is_valid() {
        assert_eq!(table_spec(&load_config().unwrap()).validate(), Ok(()));
    }

    #[test]
    fn test_department_sorts_by_backend_column() {
        let spec = table_spec(&load_config().unwrap());
        assert_eq!(spec.sort_map.to_backend("department"), Some("department_name"));
        assert_eq!(spec.sort_map.to_frontend("department_name"), Some("department"));
    }

    #[test]
    fn test_cells_and_edit_form() {
        let user: User = serde_json::from_value(json!({
            "id": 5,
            "name": "Ann",
            "email": "ann@example.com",
            "role": "admin",
            "is_active": true
        }))
        .unwrap();
        assert_eq!(user.cell("is_active"), "Active");
        assert_eq!(user.cell("last_login_at"), "-");
        assert_eq!(user.cell("department"), "");
        let form = form_from(&user);
        assert_eq!(form.role, "admin");
        assert!(form.is_active);
    }
}
