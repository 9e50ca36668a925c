use super::columns::ColumnDef;
use super::error::TableError;
use super::filters::{ClearPolicy, ListFormat};
use super::normalize::Envelope;
use super::sort::{SortMap, SortState};
use std::collections::{BTreeMap, BTreeSet};

/// Everything a page declares about its table: endpoint shape, columns and
/// defaults. Constructed once per page and validated before the first fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    /// Page identity, also the prefix of persisted preferences.
    pub page_id: &'static str,
    pub endpoint: &'static str,
    /// Backend CSV export; `None` exports the loaded rows directly.
    pub export_endpoint: Option<&'static str>,
    pub envelope: Envelope,
    pub list_format: ListFormat,
    pub clear_policy: ClearPolicy,
    pub columns: Vec<ColumnDef>,
    pub default_visible: Vec<&'static str>,
    pub sort_map: SortMap,
    pub default_sort: SortState,
    pub page_sizes: Vec<u32>,
    pub default_per_page: u32,
    /// Client-side option lists that server responses never replace.
    pub static_options: BTreeMap<String, Vec<String>>,
}

impl TableSpec {
    pub fn per_page_key(&self) -> String {
        format!("{}_perPage", self.page_id)
    }

    pub fn hidden_cols_key(&self) -> String {
        format!("{}_hiddenCols", self.page_id)
    }

    pub fn column(&self, key: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Checks the declared columns against the sort map and defaults.
    pub fn validate(&self) -> Result<(), TableError> {
        let fail = |msg: String| Err(TableError::Config(format!("{}: {}", self.page_id, msg)));

        let mut keys = BTreeSet::new();
        for c in &self.columns {
            if !keys.insert(c.key) {
                return fail(format!("duplicate column `{}`", c.key));
            }
        }
        for c in self.columns.iter().filter(|c| c.sortable) {
            if self.sort_map.to_backend(c.key).is_none() {
                return fail(format!("sortable column `{}` has no backend mapping", c.key));
            }
        }
        let mut backend = BTreeSet::new();
        for (front, back) in self.sort_map.pairs() {
            match self.column(front) {
                Some(c) if c.sortable => {}
                Some(_) => return fail(format!("mapped column `{}` is not sortable", front)),
                None => return fail(format!("sort mapping names unknown column `{}`", front)),
            }
            if !backend.insert(*back) {
                return fail(format!("backend column `{}` mapped twice", back));
            }
        }
        for key in &self.default_visible {
            if !keys.contains(key) {
                return fail(format!("default-visible column `{}` is not declared", key));
            }
        }
        if let Some(field) = &self.default_sort.field {
            if self.sort_map.to_backend(field).is_none() {
                return fail(format!("default sort `{}` is not sortable", field));
            }
        }
        if !self.page_sizes.contains(&self.default_per_page) {
            return fail(format!(
                "default page size {} is not one of {:?}",
                self.default_per_page, self.page_sizes
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use contracts::shared::list_query::SortDirection;

    pub(crate) fn demo_spec() -> TableSpec {
        TableSpec {
            page_id: "demo",
            endpoint: "/api/demo",
            export_endpoint: Some("/api/demo/export"),
            envelope: Envelope::NestedData,
            list_format: ListFormat::Bracket,
            clear_policy: ClearPolicy::Omit,
            columns: vec![
                ColumnDef::row_number(),
                ColumnDef::new("name", "Name").sortable(),
                ColumnDef::new("sitename", "Site").sortable(),
                ColumnDef::new("phone", "Phone"),
                ColumnDef::actions(),
            ],
            default_visible: vec!["row_number", "name", "sitename", "actions"],
            sort_map: SortMap::new(&[("name", "lead_name"), ("sitename", "lead_website")]),
            default_sort: SortState::by("name", SortDirection::Asc),
            page_sizes: vec![25, 50, 100],
            default_per_page: 25,
            static_options: BTreeMap::from([(
                "utm_sources".to_string(),
                vec!["google".to_string(), "direct".to_string()],
            )]),
        }
    }

    #[test]
    fn test_demo_spec_is_valid() {
        assert_eq!(demo_spec().validate(), Ok(()));
        assert_eq!(demo_spec().per_page_key(), "demo_perPage");
        assert_eq!(demo_spec().hidden_cols_key(), "demo_hiddenCols");
    }

    #[test]
    fn test_missing_sort_mapping_fails() {
        let mut spec = demo_spec();
        spec.columns[3] = ColumnDef::new("phone", "Phone").sortable();
        let err = spec.validate().unwrap_err();
        assert_eq!(
            err,
            TableError::Config("demo: sortable column `phone` has no backend mapping".into())
        );
    }

    #[test]
    fn test_mapping_to_unknown_column_fails() {
        let mut spec = demo_spec();
        spec.sort_map = SortMap::new(&[
            ("name", "lead_name"),
            ("sitename", "lead_website"),
            ("email", "lead_email"),
        ]);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_duplicate_backend_column_fails() {
        let mut spec = demo_spec();
        spec.sort_map = SortMap::new(&[("name", "lead_name"), ("sitename", "lead_name")]);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_bad_default_page_size_fails() {
        let mut spec = demo_spec();
        spec.default_per_page = 30;
        assert!(spec.validate().is_err());
    }
}
