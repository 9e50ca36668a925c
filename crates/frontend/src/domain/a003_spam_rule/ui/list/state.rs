use contracts::domain::a003_spam_rule::dto::SpamRuleDto;
use contracts::shared::list_query::SortDirection;

use crate::domain::a003_spam_rule::api::{EXPORT_ENDPOINT, LIST_ENDPOINT};
use crate::shared::config::AppConfig;
use crate::shared::data_table::row::opt;
use crate::shared::data_table::{
    ClearPolicy, ColumnDef, Envelope, FilterValue, ListFormat, SortMap, SortState, TableFilters,
    TableRow, TableSpec,
};
use crate::shared::date_utils::format_datetime;

pub const PAGE_ID: &str = "spam_rules";

pub const FILTER_LABELS: &[(&str, &str)] = &[("rule_type", "Type"), ("is_active", "Active")];

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
            ColumnDef::new("rule_type", "Type").sortable(),
            ColumnDef::new("value", "Value").sortable(),
            ColumnDef::new("is_active", "Active").sortable(),
            ColumnDef::new("hits", "Hits").sortable(),
            ColumnDef::new("created_at", "Created").sortable(),
            ColumnDef::actions(),
        ],
        default_visible: vec![
            "row_number",
            "rule_type",
            "value",
            "is_active",
            "hits",
            "actions",
        ],
        sort_map: SortMap::new(&[
            ("rule_type", "rule_type"),
            ("value", "value"),
            ("is_active", "is_active"),
            ("hits", "hits"),
            ("created_at", "created_at"),
        ]),
        default_sort: SortState::by("created_at", SortDirection::Desc),
        page_sizes: config.table.page_sizes.clone(),
        default_per_page: config.table.default_per_page,
        static_options: Default::default(),
    }
}

impl TableRow for SpamRuleDto {
    fn row_id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "rule_type" => self.rule_type.clone(),
            "value" => self.value.clone(),
            "is_active" => yes_no(self.is_active).to_string(),
            "hits" => self.hits.to_string(),
            "created_at" => format_datetime(&opt(&self.created_at)),
            _ => String::new(),
        }
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpamRuleFilters {
    pub rule_types: Vec<String>,
    /// `""`, `"1"` or `"0"`.
    pub is_active: String,
}

impl TableFilters for SpamRuleFilters {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        vec![
            ("rule_type", FilterValue::multi(&self.rule_types)),
            ("is_active", FilterValue::scalar(&self.is_active)),
        ]
    }

    fn clear_key(&mut self, key: &str) {
        match key {
            "rule_type" => self.rule_types.clear(),
            "is_active" => self.is_active.clear(),
            _ => {}
        }
    }
}
