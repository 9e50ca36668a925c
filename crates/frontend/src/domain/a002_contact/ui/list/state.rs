use contracts::domain::a002_contact::dto::{ContactDto, ContactFormDto};
use contracts::shared::list_query::SortDirection;

use crate::domain::a002_contact::api::{EXPORT_ENDPOINT, LIST_ENDPOINT};
use crate::shared::config::AppConfig;
use crate::shared::data_table::row::opt;
use crate::shared::data_table::{
    ClearPolicy, ColumnDef, Envelope, FilterValue, ListFormat, SortMap, SortState, TableFilters,
    TableRow, TableSpec,
};
use crate::shared::date_utils::format_datetime;

pub const PAGE_ID: &str = "contacts";

pub const SOURCE_OPTIONS: &str = "sources";
pub const OWNER_OPTIONS: &str = "owners";

pub const FILTER_LABELS: &[(&str, &str)] = &[("source", "Source"), ("owner", "Owner")];

pub fn table_spec(config: &AppConfig) -> TableSpec {
    TableSpec {
        page_id: PAGE_ID,
        endpoint: LIST_ENDPOINT,
        export_endpoint: Some(EXPORT_ENDPOINT),
        envelope: Envelope::FiltersData,
        list_format: ListFormat::Comma,
        clear_policy: ClearPolicy::AllSentinel,
        columns: vec![
            ColumnDef::row_number(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("email", "Email").sortable(),
            ColumnDef::new("phone", "Phone"),
            ColumnDef::new("company", "Company").sortable(),
            ColumnDef::new("source", "Source").sortable(),
            ColumnDef::new("owner", "Owner"),
            ColumnDef::new("created_at", "Created").sortable(),
            ColumnDef::actions(),
        ],
        default_visible: vec![
            "row_number",
            "name",
            "email",
            "company",
            "source",
            "created_at",
            "actions",
        ],
        sort_map: SortMap::new(&[
            ("name", "first_name"),
            ("email", "email"),
            ("company", "company"),
            ("source", "source"),
            ("created_at", "created_at"),
        ]),
        default_sort: SortState::by("created_at", SortDirection::Desc),
        page_sizes: config.table.page_sizes.clone(),
        default_per_page: config.table.default_per_page,
        static_options: Default::default(),
    }
}

impl TableRow for ContactDto {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => full_name(self),
            "email" => opt(&self.email),
            "phone" => opt(&self.phone),
            "company" => opt(&self.company),
            "source" => opt(&self.source),
            "owner" => opt(&self.owner),
            "created_at" => format_datetime(&opt(&self.created_at)),
            _ => String::new(),
        }
    }
}

pub fn full_name(contact: &ContactDto) -> String {
    [&contact.first_name, &contact.last_name]
        .iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Edit form prefilled from a row.
pub fn form_from(contact: &ContactDto) -> ContactFormDto {
    ContactFormDto {
        first_name: opt(&contact.first_name),
        last_name: opt(&contact.last_name),
        email: opt(&contact.email),
        phone: opt(&contact.phone),
        company: opt(&contact.company),
        source: opt(&contact.source),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFilters {
    pub sources: Vec<String>,
    pub owner: String,
}

impl TableFilters for ContactFilters {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        vec![
            ("source", FilterValue::multi(&self.sources)),
            ("owner", FilterValue::scalar(&self.owner)),
        ]
    }

    fn clear_key(&mut self, key: &str) {
        match key {
            "source" => self.sources.clear(),
            "owner" => self.owner.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;
    use crate::shared::data_table::filters::encode_filters;
    use crate::shared::data_table::normalize::normalize;
    use crate::shared::data_table::DataTableController;
    use serde_json::json;

    #[test]
    fn test_spec_is_valid() {
        assert_eq!(table_spec(&load_config().unwrap()).validate(), Ok(()));
    }

    #[test]
    fn test_cleared_filters_send_all_sentinel() {
        let spec = table_spec(&load_config().unwrap());
        let filters = ContactFilters {
            sources: vec!["web".into(), "fair".into()],
            owner: String::new(),
        };
        assert_eq!(
            encode_filters(&filters, spec.list_format, spec.clear_policy),
            vec![
                ("source".to_string(), "web,fair".to_string()),
                ("owner".to_string(), "All".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_name_skips_missing_parts() {
        let contact: ContactDto =
            serde_json::from_value(json!({ "id": 3, "last_name": "Smith" })).unwrap();
        assert_eq!(full_name(&contact), "Smith");
        let contact: ContactDto =
            serde_json::from_value(json!({ "id": 3, "first_name": "Jo", "last_name": "Smith" }))
                .unwrap();
        assert_eq!(contact.cell("name"), "Jo Smith");
        assert_eq!(form_from(&contact).first_name, "Jo");
        assert_eq!(form_from(&contact).phone, "");
    }

    #[test]
    fn test_filters_data_envelope_feeds_options() {
        let config = load_config().unwrap();
        let mut ctl =
            DataTableController::<ContactDto, ContactFilters>::new(table_spec(&config)).unwrap();
        let ticket = ctl.begin_fetch().unwrap();
        let body = json!({
            "filters": {
                "data": [{ "id": 1, "first_name": "Jo" }, { "id": 2, "first_name": "Al" }],
                "total_count": 42,
                "sources": ["web", "fair"],
                "owners": [{ "value": "ann", "label": "Ann" }]
            }
        });
        let page = normalize::<ContactDto>(Envelope::FiltersData, body, &ticket.query);
        ctl.complete_fetch(&ticket, page);
        assert_eq!(ctl.rows().len(), 2);
        assert_eq!(ctl.total(), 42);
        assert_eq!(ctl.last_page(), 2);
        assert_eq!(ctl.options(SOURCE_OPTIONS), vec!["web".to_string(), "fair".to_string()]);
        assert_eq!(ctl.options(OWNER_OPTIONS), vec!["ann".to_string()]);
    }
}
