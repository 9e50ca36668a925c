use contracts::shared::list_query::SortDirection;

/// Current sort of a table, by logical (UI-facing) column key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(field: &str, direction: SortDirection) -> Self {
        Self {
            field: Some(field.to_string()),
            direction,
        }
    }

    /// Header click: the current column flips direction, any other column
    /// starts ascending.
    pub fn click(&mut self, key: &str) {
        if self.field.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// Direction if the table is sorted by `key`.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.field.as_deref() == Some(key)).then_some(self.direction)
    }
}

/// Static `frontend key <-> backend column` table for sortable columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortMap {
    pairs: Vec<(&'static str, &'static str)>,
}

impl SortMap {
    pub fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            pairs: pairs.to_vec(),
        }
    }

    pub fn to_backend(&self, key: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(front, _)| *front == key)
            .map(|(_, back)| *back)
    }

    pub fn to_frontend(&self, column: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(_, back)| *back == column)
            .map(|(front, _)| *front)
    }

    pub fn pairs(&self) -> &[(&'static str, &'static str)] {
        &self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_click_cycle() {
        let mut s = SortState::unsorted();
        s.click("name");
        assert_eq!(s, SortState::by("name", SortDirection::Asc));
        s.click("name");
        assert_eq!(s, SortState::by("name", SortDirection::Desc));
        s.click("name");
        assert_eq!(s, SortState::by("name", SortDirection::Asc));
        s.click("name");
        s.click("email");
        assert_eq!(s, SortState::by("email", SortDirection::Asc));
    }

    #[test]
    fn test_sort_map_is_bidirectional() {
        let map = SortMap::new(&[("sitename", "lead_website"), ("name", "lead_name")]);
        assert_eq!(map.to_backend("sitename"), Some("lead_website"));
        assert_eq!(map.to_frontend("lead_name"), Some("name"));
        assert_eq!(map.to_backend("phone"), None);
    }

    proptest! {
        #[test]
        fn prop_other_column_enters_ascending(
            prior in proptest::option::of("[a-c]"),
            desc in any::<bool>(),
            next in "[a-c]",
        ) {
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            let mut s = SortState { field: prior.clone(), direction };
            s.click(&next);
            if prior.as_deref() == Some(next.as_str()) {
                prop_assert_eq!(s.direction, direction.toggled());
            } else {
                prop_assert_eq!(s.direction, SortDirection::Asc);
            }
            prop_assert_eq!(s.field.as_deref(), Some(next.as_str()));
        }
    }
}
