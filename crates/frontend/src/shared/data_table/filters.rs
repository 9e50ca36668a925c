/// How an endpoint expects multi-value filters on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// `a,b,c`
    Comma,
    /// `[a,b,c]`
    Bracket,
}

/// How an endpoint expects "no filter" on a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPolicy {
    /// Leave the key out of the query.
    Omit,
    /// Send the key with [`ALL_SENTINEL`].
    AllSentinel,
}

pub const ALL_SENTINEL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterValue {
    #[default]
    Empty,
    Scalar(String),
    Multi(Vec<String>),
}

impl FilterValue {
    /// Human-readable form for filter chips.
    pub fn display(&self) -> String {
        match self {
            FilterValue::Empty => String::new(),
            FilterValue::Scalar(v) => v.clone(),
            FilterValue::Multi(values) => values.join(", "),
        }
    }

    pub fn scalar(value: &str) -> Self {
        if value.trim().is_empty() {
            FilterValue::Empty
        } else {
            FilterValue::Scalar(value.trim().to_string())
        }
    }

    pub fn multi(values: &[String]) -> Self {
        let values: Vec<String> = values
            .iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() {
            FilterValue::Empty
        } else {
            FilterValue::Multi(values)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilterValue::Empty)
    }

    /// Wire representation, `None` when the value is empty.
    pub fn encode(&self, format: ListFormat) -> Option<String> {
        match self {
            FilterValue::Empty => None,
            FilterValue::Scalar(v) => Some(v.clone()),
            FilterValue::Multi(values) => {
                let joined = values.join(",");
                Some(match format {
                    ListFormat::Comma => joined,
                    ListFormat::Bracket => format!("[{}]", joined),
                })
            }
        }
    }
}

/// A page's filter form. `Default` is the cleared state.
pub trait TableFilters: Clone + Default + PartialEq + Send + Sync + 'static {
    /// Every filter key with its current value, in wire order. Cleared keys
    /// are still listed (as [`FilterValue::Empty`]) so sentinel endpoints can
    /// send them.
    fn entries(&self) -> Vec<(&'static str, FilterValue)>;

    /// Resets one key to its cleared value.
    fn clear_key(&mut self, key: &str);

    fn active_count(&self) -> usize {
        self.entries().iter().filter(|(_, v)| !v.is_empty()).count()
    }
}

/// For pages without a filter form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoFilters;

impl TableFilters for NoFilters {
    fn entries(&self) -> Vec<(&'static str, FilterValue)> {
        Vec::new()
    }

    fn clear_key(&mut self, _key: &str) {}
}

/// Query pairs for `filters` in the endpoint's wire format.
pub fn encode_filters<F: TableFilters>(
    filters: &F,
    format: ListFormat,
    clear: ClearPolicy,
) -> Vec<(String, String)> {
    filters
        .entries()
        .into_iter()
        .filter_map(|(key, value)| match (value.encode(format), clear) {
            (Some(v), _) => Some((key.to_string(), v)),
            (None, ClearPolicy::AllSentinel) => Some((key.to_string(), ALL_SENTINEL.to_string())),
            (None, ClearPolicy::Omit) => None,
        })
        .collect()
}

/// Filter form inputs (`pending`) and the values last committed to the query
/// (`applied`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState<F> {
    pub pending: F,
    pub applied: F,
}

impl<F: TableFilters> FilterState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self) {
        self.applied = self.pending.clone();
    }

    pub fn clear(&mut self) {
        self.pending = F::default();
        self.applied = F::default();
    }

    /// Pending inputs differ from what was last sent.
    pub fn is_dirty(&self) -> bool {
        self.pending != self.applied
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    pub(crate) struct DemoFilters {
        pub stages: Vec<String>,
        pub owner: String,
    }

    impl TableFilters for DemoFilters {
        fn entries(&self) -> Vec<(&'static str, FilterValue)> {
            vec![
                ("stage", FilterValue::multi(&self.stages)),
                ("owner", FilterValue::scalar(&self.owner)),
            ]
        }

        fn clear_key(&mut self, key: &str) {
            match key {
                "stage" => self.stages.clear(),
                "owner" => self.owner.clear(),
                _ => {}
            }
        }
    }

    fn demo() -> DemoFilters {
        DemoFilters {
            stages: vec!["new".into(), " won ".into(), "".into()],
            owner: "ann".into(),
        }
    }

    #[test]
    fn test_bracket_and_comma_formats() {
        assert_eq!(
            encode_filters(&demo(), ListFormat::Bracket, ClearPolicy::Omit),
            vec![
                ("stage".to_string(), "[new,won]".to_string()),
                ("owner".to_string(), "ann".to_string())
            ]
        );
        assert_eq!(
            encode_filters(&demo(), ListFormat::Comma, ClearPolicy::Omit)[0].1,
            "new,won"
        );
    }

    #[test]
    fn test_cleared_keys_follow_policy() {
        let empty = DemoFilters::default();
        assert!(encode_filters(&empty, ListFormat::Comma, ClearPolicy::Omit).is_empty());
        assert_eq!(
            encode_filters(&empty, ListFormat::Comma, ClearPolicy::AllSentinel),
            vec![
                ("stage".to_string(), "All".to_string()),
                ("owner".to_string(), "All".to_string())
            ]
        );
    }

    #[test]
    fn test_active_count() {
        assert_eq!(demo().active_count(), 2);
        assert_eq!(DemoFilters::default().active_count(), 0);
    }

    #[test]
    fn test_apply_and_clear() {
        let mut state = FilterState::<DemoFilters>::new();
        state.pending.owner = "bob".into();
        assert!(state.is_dirty());
        assert_eq!(state.applied.owner, "");
        state.apply();
        assert_eq!(state.applied, state.pending);
        state.clear();
        assert_eq!(state.applied, DemoFilters::default());
        assert_eq!(state.pending, DemoFilters::default());
    }
}
