/// A normalized backend record as the table sees it.
pub trait TableRow: Clone + PartialEq + Send + Sync + 'static {
    /// Stable id: render key and target of row actions.
    fn row_id(&self) -> String;

    /// Display value of `key`, empty when the record has none.
    fn cell(&self, key: &str) -> String;
}

pub(crate) fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
