use contracts::domain::a001_lead::dto::LeadDto;
use contracts::shared::list_query::SortDirection;

use crate::domain::a001_lead::api::{EXPORT_ENDPOINT, LIST_ENDPOINT};
use crate::shared::config::AppConfig;
use crate::shared::data_table::row::opt;
use crate::shared::data_table::{
    ClearPolicy, ColumnDef, Envelope, FilterValue, ListFormat, SortMap, SortState, TableError,
    TableFilters, TableRow, TableSpec,
};
use crate::shared::date_utils::{format_datetime, is_date_or_empty};

pub const PAGE_ID: &str = "leads";

/// Option-list keys: the first three come from the server, UTM sources from config.
pub const CAMPAIGN_OPTIONS: &str = "campaigns";
pub const SERVICE_OPTIONS: &str = "services";
pub const STAGE_OPTIONS: &str = "stages";
pub const UTM_OPTIONS: &str = "utm_sources";

pub const FILTER_LABELS: &[(&str, &str)] = &[
    ("campaign", "Campaign"),
    ("service", "Service"),
    ("stage", "Stage"),
    ("utm_source", "UTM source"),
    ("status", "Status"),
    ("date_from", "From"),
    ("date_to", "To"),
];

pub fn table_spec(config: &AppConfig) -> TableSpec {
    TableSpec {
        page_id: PAGE_ID,
        endpoint: LIST_ENDPOINT,
        export_endpoint: Some(EXPORT_ENDPOINT),
        envelope: Envelope::NestedData,
        list_format: ListFormat::Bracket,
        clear_policy: ClearPolicy::Omit,
        columns: vec![
            ColumnDef::row_number(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("email", "Email").sortable(),
            ColumnDef::new("phone", "Phone"),
            ColumnDef::new("sitename", "Site").sortable(),
            ColumnDef::new("campaign", "Campaign").sortable(),
            ColumnDef::new("service", "Service"),
            ColumnDef::new("stage", "Stage").sortable(),
            ColumnDef::new("utm_source", "UTM source"),
            ColumnDef::new("status", "Status").sortable(),
            ColumnDef::new("created_at", "Created").sortable(),
            ColumnDef::actions(),
        ],
        default_visible: vec![
            "row_number",
            "name",
            "email",
            "sitename",
            "campaign",
            "stage",
            "status",
            "created_at",
            "actions",
        ],
        sort_map: SortMap::new(&[
            ("name", "lead_name"),
            ("email", "lead_email"),
            ("sitename", "lead_website"),
            ("campaign", "campaign"),
            ("stage", "stage"),
            ("status", "status"),
            ("created_at", "created_at"),
        ]),
        default_sort: SortState::by("created_at", SortDirection::Desc),
        page_sizes: config.table.page_sizes.clone(),
        default_per_page: config.table.default_per_page,
        static_options: config.static_options(&[UTM_OPTIONS]),
    }
}

impl TableRow for LeadDto {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => opt(&self.lead_name),
            "email" => opt(&self.lead_email),
            "phone" => opt(&self.lead_phone),
            "sitename" => opt(&self.lead_website),
            "campaign" => opt(&self.campaign),
            "service" => opt(&self.service),
            "stage" => opt(&self.stage),
            "utm_source" => opt(&self.utm_source),
            "status" => opt(&self.status),
            "created_at" => format_datetime(&opt(&self.created_at)),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilters {
    pub campaigns: Vec<String>,
    pub services: Vec<String>,
    pub stages: Vec<String>,
    pub utm_sources: Vec<String>,
    pub status: String,
    pub date_from: String,
    pub date_to: String,
}

impl LeadFilters {
    /// Date inputs must be `YYYY-MM-DD` and ordered.
    pub fn check_dates(&self) -> Result<(), TableError> {
        if !is_date_or_empty(&self.date_from) || !is_date_or_empty(&self.date_to) {
            return Err(TableError::Guard("Dates must be YYYY-MM-DD".into()));
        }
        if !self.date_from.is_empty() && !self.date_to.is_empty() && self.date_from > self.date_to
        {
            return Err(TableError::Guard("\"From\" is after \"To\"".into()));
        }
        Ok(())
    }
}

impl TableFilters for LeadFilters {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        vec![
            ("campaign", FilterValue::multi(&self.campaigns)),
            ("service", FilterValue::multi(&self.services)),
            ("stage", FilterValue::multi(&self.stages)),
            ("utm_source", FilterValue::multi(&self.utm_sources)),
            ("status", FilterValue::scalar(&self.status)),
            ("date_from", FilterValue::scalar(&self.date_from)),
            ("date_to", FilterValue::scalar(&self.date_to)),
        ]
    }

    fn clear_key(&mut self, key: &str) {
        match key {
            "campaign" => self.campaigns.clear(),
            "service" => self.services.clear(),
            "stage" => self.stages.clear(),
            "utm_source" => self.utm_sources.clear(),
            "status" => self.status.clear(),
            "date_from" => self.date_from.clear(),
            "date_to" => self.date_to.clear(),
            _ => {}
        }
    }
}

/// Status of lead `id` as last fetched; empty when the lead is not on the
/// page or has none.
pub fn status_of(rows: &[LeadDto], id: i64) -> String {
    rows.iter()
        .find(|lead| lead.id == id)
        .and_then(|lead| lead.status.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::load_config;
    use crate::shared::data_table::filters::encode_filters;
    use crate::shared::data_table::normalize::normalize;
    use crate::shared::data_table::{DataTableController, ListPage};
    use serde_json::json;

    fn lead(id: i64, name: &str) -> LeadDto {
        serde_json::from_value(json!({ "id": id, "lead_name": name })).unwrap()
    }

    #[test]
    fn test_spec_is_valid() {
        let spec = table_spec(&load_config().unwrap());
        assert_eq!(spec.validate(), Ok(()));
        assert!(spec.static_options.contains_key(UTM_OPTIONS));
    }

    #[test]
    fn test_filters_use_bracket_lists_and_omit_cleared() {
        let spec = table_spec(&load_config().unwrap());
        let filters = LeadFilters {
            campaigns: vec!["spring".into(), "brand".into()],
            status: "new".into(),
            ..Default::default()
        };
        assert_eq!(
            encode_filters(&filters, spec.list_format, spec.clear_policy),
            vec![
                ("campaign".to_string(), "[spring,brand]".to_string()),
                ("status".to_string(), "new".to_string()),
            ]
        );
    }

    #[test]
    fn test_clear_key_resets_one_filter() {
        let mut filters = LeadFilters {
            stages: vec!["won".into()],
            date_from: "2024-01-01".into(),
            ..Default::default()
        };
        filters.clear_key("stage");
        assert!(filters.stages.is_empty());
        assert_eq!(filters.active_count(), 1);
    }

    #[test]
    fn test_check_dates() {
        let mut filters = LeadFilters::default();
        assert!(filters.check_dates().is_ok());
        filters.date_from = "2024-05-01".into();
        filters.date_to = "2024-04-01".into();
        assert!(filters.check_dates().is_err());
        filters.date_to = "2024-05-31".into();
        assert!(filters.check_dates().is_ok());
        filters.date_to = "31.05.2024".into();
        assert!(filters.check_dates().is_err());
    }

    #[test]
    fn test_cells_project_dto_fields() {
        let row: LeadDto = serde_json::from_value(json!({
            "id": 7,
            "lead_name": "Ann",
            "lead_website": "ann.io",
            "created_at": "2024-03-15 14:02:26"
        }))
        .unwrap();
        assert_eq!(row.row_id(), "7");
        assert_eq!(row.cell("sitename"), "ann.io");
        assert_eq!(row.cell("phone"), "");
        assert_eq!(row.cell("created_at"), "2024-03-15 14:02");
    }

    #[test]
    fn test_server_options_keep_utm_sources() {
        let config = load_config().unwrap();
        let mut ctl =
            DataTableController::<LeadDto, LeadFilters>::new(table_spec(&config)).unwrap();
        let ticket = ctl.begin_fetch().unwrap();
        let body = json!({
            "data": { "data": [{ "id": 1, "lead_name": "Ann" }], "total": 1 },
            "filters": { "campaigns": ["spring"], "stages": ["new", "won"] }
        });
        let page = normalize::<LeadDto>(Envelope::NestedData, body, &ticket.query);
        ctl.complete_fetch(&ticket, page);
        assert_eq!(ctl.rows(), &[lead(1, "Ann")]);
        assert_eq!(ctl.options(CAMPAIGN_OPTIONS), vec!["spring".to_string()]);
        assert_eq!(ctl.options(STAGE_OPTIONS).len(), 2);
        assert_eq!(ctl.options(UTM_OPTIONS), config.options[UTM_OPTIONS]);
    }

    #[test]
    fn test_status_of_reads_fetched_rows() {
        let mut won = lead(7, "Acme");
        won.status = Some("won".into());
        let rows = vec![lead(3, "Bolt"), won];

        assert_eq!(status_of(&rows, 7), "won");
        assert_eq!(status_of(&rows, 3), "");
        assert_eq!(status_of(&rows, 99), "");
    }

    #[test]
    fn test_select_reverts_when_status_change_fails() {
        let spec = table_spec(&load_config().unwrap());
        let mut ctl: DataTableController<LeadDto, LeadFilters> =
            DataTableController::new(spec).unwrap();
        let mut open = lead(7, "Acme");
        open.status = Some("new".into());
        let t = ctl.begin_fetch().unwrap();
        let page = ListPage {
            rows: vec![open],
            total: 1,
            options: Default::default(),
        };
        ctl.complete_fetch(&t, Ok(page));

        // a rejected update never refetches; the select falls back to this
        assert_eq!(status_of(ctl.rows(), 7), "new");
    }
}
