use std::collections::BTreeSet;

/// Key of the row-number column rendered by the grid itself.
pub const ROW_NUMBER_KEY: &str = "row_number";
/// Key of the per-row actions column.
pub const ACTIONS_KEY: &str = "actions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    /// Always visible, never exported (row number, actions).
    pub exempt: bool,
}

impl ColumnDef {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            sortable: false,
            exempt: false,
        }
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub const fn exempt(mut self) -> Self {
        self.exempt = true;
        self
    }

    pub const fn row_number() -> Self {
        Self::new(ROW_NUMBER_KEY, "#").exempt()
    }

    pub const fn actions() -> Self {
        Self::new(ACTIONS_KEY, "").exempt()
    }
}

/// Hidden column keys. Exempt columns ignore membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    hidden: BTreeSet<String>,
}

impl ColumnVisibility {
    /// Factory default: `AllColumns \ DefaultVisible`.
    pub fn defaults(columns: &[ColumnDef], default_visible: &[&str]) -> Self {
        Self {
            hidden: columns
                .iter()
                .map(|c| c.key)
                .filter(|k| !default_visible.contains(k))
                .map(str::to_string)
                .collect(),
        }
    }

    /// Restores a persisted set, dropping keys no longer declared.
    pub fn from_persisted(columns: &[ColumnDef], hidden: Vec<String>) -> Self {
        Self {
            hidden: hidden
                .into_iter()
                .filter(|k| columns.iter().any(|c| c.key == k))
                .collect(),
        }
    }

    pub fn hidden(&self) -> &BTreeSet<String> {
        &self.hidden
    }

    pub fn is_visible(&self, column: &ColumnDef) -> bool {
        column.exempt || !self.hidden.contains(column.key)
    }

    /// Returns `false` when nothing changed (exempt or undeclared key).
    pub fn toggle(&mut self, columns: &[ColumnDef], key: &str) -> bool {
        match columns.iter().find(|c| c.key == key) {
            Some(column) if !column.exempt => {
                if !self.hidden.remove(key) {
                    self.hidden.insert(key.to_string());
                }
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self, columns: &[ColumnDef], default_visible: &[&str]) {
        *self = Self::defaults(columns, default_visible);
    }

    pub fn show_all(&mut self) {
        self.hidden.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::row_number(),
            ColumnDef::new("name", "Name").sortable(),
            ColumnDef::new("email", "Email"),
            ColumnDef::new("phone", "Phone"),
            ColumnDef::actions(),
        ]
    }

    #[test]
    fn test_defaults_hide_complement() {
        let cols = columns();
        let vis = ColumnVisibility::defaults(&cols, &["row_number", "name", "actions"]);
        let hidden: Vec<&str> = vis.hidden().iter().map(String::as_str).collect();
        assert_eq!(hidden, vec!["email", "phone"]);
    }

    #[test]
    fn test_exempt_toggle_is_noop() {
        let cols = columns();
        let mut vis = ColumnVisibility::defaults(&cols, &["name"]);
        let before = vis.clone();
        assert!(!vis.toggle(&cols, ACTIONS_KEY));
        assert!(!vis.toggle(&cols, ROW_NUMBER_KEY));
        assert!(!vis.toggle(&cols, "unknown"));
        assert_eq!(vis, before);
        // exempt columns stay visible even though they are in the hidden set
        assert!(vis.is_visible(&cols[0]));
        assert!(vis.is_visible(&cols[4]));
    }

    #[test]
    fn test_toggle_and_reset() {
        let cols = columns();
        let mut vis = ColumnVisibility::defaults(&cols, &["name", "email"]);
        assert!(vis.toggle(&cols, "email"));
        assert!(!vis.is_visible(&cols[2]));
        assert!(vis.toggle(&cols, "email"));
        assert!(vis.is_visible(&cols[2]));

        vis.show_all();
        assert!(vis.hidden().is_empty());
        vis.reset(&cols, &["name", "email"]);
        assert_eq!(vis, ColumnVisibility::defaults(&cols, &["name", "email"]));
    }

    #[test]
    fn test_persisted_unknown_keys_dropped() {
        let vis = ColumnVisibility::from_persisted(
            &columns(),
            vec!["phone".to_string(), "legacy".to_string()],
        );
        assert_eq!(vis.hidden().len(), 1);
    }
}
