use contracts::shared::list_query::SortDirection;
use contracts::system::departments::Department;

use crate::shared::config::AppConfig;
use crate::shared::data_table::row::opt;
use crate::shared::data_table::{
    ClearPolicy, ColumnDef, Envelope, ListFormat, SortMap, SortState, TableRow, TableSpec,
};
use crate::system::departments::api::LIST_ENDPOINT;

pub const PAGE_ID: &str = "departments";

/// No export endpoint: CSV comes from the loaded page.
pub fn table_spec(config: &AppConfig) -> TableSpec {
    TableSpec {
        page_id: PAGE_ID,
        endpoint: LIST_ENDPOINT,
        export_endpoint: None,
        envelope: Envelope::PlainList,
        list_format: ListFormat::Comma,
        clear_policy: ClearPolicy::Omit,
        columns: vec![
            ColumnDef::row_number(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("description", "Description"),
            ColumnDef::new("users_count", "Users").sortable(),
            ColumnDef::actions(),
        ],
        default_visible: vec!["row_number", "name", "description", "users_count", "actions"],
        sort_map: SortMap::new(&[("name", "name"), ("users_count", "users_count")]),
        default_sort: SortState::by("name", SortDirection::Asc),
        page_sizes: config.table.page_sizes.clone(),
        default_per_page: config.table.default_per_page,
        static_options: Default::default(),
    }
}

impl TableRow for Department {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "description" => opt(&self.description),
            "users_count" => self.users_count.to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;
    use crate::shared::data_table::normalize::normalize;
    use crate::shared::data_table::{DataTableController, NoFilters};
    use serde_json::json;

    #[test]
    fn test_spec_is_valid() {
        assert_eq!(table_spec(&load_config().unwrap()).validate(), Ok(()));
    }

    #[test]
    fn test_plain_list_pages_locally() {
        let config = load_config().unwrap();
        let mut ctl =
            DataTableController::<Department, NoFilters>::new(table_spec(&config)).unwrap();
        let body = json!((1..=30)
            .map(|i| json!({ "id": i, "name": format!("Dept {:02}", i) }))
            .collect::<Vec<_>>());

        let ticket = ctl.begin_fetch().unwrap();
        let page = normalize::<Department>(Envelope::PlainList, body.clone(), &ticket.query);
        ctl.complete_fetch(&ticket, page);
        assert_eq!(ctl.total(), 30);
        assert_eq!(ctl.last_page(), 2);
        assert_eq!(ctl.rows().len(), 25);

        ctl.set_page(2);
        let ticket = ctl.begin_fetch().unwrap();
        let page = normalize::<Department>(Envelope::PlainList, body, &ticket.query);
        ctl.complete_fetch(&ticket, page);
        assert_eq!(ctl.rows().len(), 5);
        assert_eq!(ctl.rows()[0].cell("name"), "Dept 26");
    }

    #[test]
    fn test_export_without_endpoint_uses_loaded_rows() {
        let config = load_config().unwrap();
        let mut ctl =
            DataTableController::<Department, NoFilters>::new(table_spec(&config)).unwrap();
        let job = ctl.begin_export().unwrap();
        assert_eq!(job.endpoint, None);
        let keys: Vec<&str> = job.columns.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["name", "description", "users_count"]);
    }
}
