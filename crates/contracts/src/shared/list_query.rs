use serde::{Deserialize, Serialize};

/// Query keys that only make sense for a paged list request. Export requests
/// reuse the list query with these stripped.
pub const PAGINATION_KEYS: [&str; 2] = ["current_page", "per_page"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Parameters of `GET <resource>?current_page=&per_page=&search=&sort_field=&sort_direction=&...`.
///
/// `sort_field` is already the backend column name. Filter pairs are already
/// encoded in the endpoint's wire format and kept in insertion order so the
/// produced query string is stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub current_page: u32,
    pub per_page: u32,
    pub search: String,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    /// Flattens the query into `key=value` pairs in wire order.
    /// Empty search and an unset sort are omitted.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("current_page".to_string(), self.current_page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        if !self.search.trim().is_empty() {
            pairs.push(("search".to_string(), self.search.trim().to_string()));
        }
        if let Some(field) = &self.sort_field {
            pairs.push(("sort_field".to_string(), field.clone()));
            pairs.push((
                "sort_direction".to_string(),
                self.sort_direction.as_str().to_string(),
            ));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }

    /// Same pairs as [`ListQuery::to_pairs`] minus the pagination keys.
    pub fn to_export_pairs(&self) -> Vec<(String, String)> {
        self.to_pairs()
            .into_iter()
            .filter(|(k, _)| !PAGINATION_KEYS.contains(&k.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListQuery {
        ListQuery {
            current_page: 3,
            per_page: 50,
            search: "  acme ".to_string(),
            sort_field: Some("lead_website".to_string()),
            sort_direction: SortDirection::Desc,
            filters: vec![("stage".to_string(), "[new,won]".to_string())],
        }
    }

    #[test]
    fn test_pairs_in_wire_order() {
        let keys: Vec<String> = sample().to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "current_page",
                "per_page",
                "search",
                "sort_field",
                "sort_direction",
                "stage"
            ]
        );
    }

    #[test]
    fn test_search_is_trimmed_and_empty_omitted() {
        let pairs = sample().to_pairs();
        assert!(pairs.contains(&("search".to_string(), "acme".to_string())));

        let mut q = sample();
        q.search = "   ".to_string();
        q.sort_field = None;
        let keys: Vec<String> = q.to_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["current_page", "per_page", "stage"]);
    }

    #[test]
    fn test_export_pairs_drop_pagination() {
        let pairs = sample().to_export_pairs();
        assert!(pairs
            .iter()
            .all(|(k, _)| k != "current_page" && k != "per_page"));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_direction_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&SortDirection::Desc).unwrap(),
            "\"desc\""
        );
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
    }
}
