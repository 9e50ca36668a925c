//! List helpers: search box, match highlighting, sort indicators.
use contracts::shared::list_query::SortDirection;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Highlights case-insensitive matches of `filter` inside `text`.
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last = 0;
    for (start, end) in ranges {
        if start > last {
            parts.push(view! { <span>{text[last..start].to_string()}</span> }.into_any());
        }
        parts.push(view! { <mark class="search-match">{text[start..end].to_string()}</mark> }.into_any());
        last = end;
    }
    if last < text.len() {
        parts.push(view! { <span>{text[last..].to_string()}</span> }.into_any());
    }
    view! { <>{parts}</> }.into_any()
}

/// Byte ranges of non-overlapping matches. Only ASCII-case folding is applied
/// so offsets stay valid in `text`.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack = text.to_ascii_lowercase();
    let mut ranges = Vec::new();
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        ranges.push((start, end));
        from = end;
    }
    ranges
}

/// Keystroke generations for a debounced input. Each keystroke takes a new
/// generation; a timer may only report if its generation is still the latest.
#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and returns it.
    pub fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Invalidates every pending timer.
    pub fn clear(&self) {
        self.bump();
    }
}

/// Search box that reports its value after the user stops typing for
/// `debounce_ms`.
#[component]
pub fn SearchInput(
    /// Value currently applied to the table.
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    debounce_ms: u32,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let input_value = RwSignal::new(value.get_untracked());
    let debouncer = StoredValue::new(Debouncer::new());

    // external resets (clear filters) flow back into the box
    Effect::new(move |_| {
        let applied = value.get();
        if applied.is_empty() {
            input_value.set(applied);
        }
    });

    let handle_input = move |text: String| {
        input_value.set(text.clone());
        let mine = debouncer.with_value(Debouncer::bump);
        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            if debouncer.try_with_value(|d| d.is_current(mine)) == Some(true) {
                on_change.run(text);
            }
        });
    };

    let clear = move |_| {
        debouncer.with_value(Debouncer::clear);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || {
                    if value.get().trim().is_empty() {
                        "search-input__field"
                    } else {
                        "search-input__field search-input__field--active"
                    }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Header suffix for a column sorted in `direction`, or the neutral marker.
pub fn get_sort_indicator(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => " ⇅",
    }
}

pub fn get_sort_class(direction: Option<SortDirection>) -> &'static str {
    if direction.is_some() {
        "sort-icon sort-icon--active"
    } else {
        "sort-icon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("Acme acme", "ACME"), vec![(0, 4), (5, 9)]);
        assert!(match_ranges("Acme", "  ").is_empty());
        assert_eq!(match_ranges("Café Acme", "acme"), vec![(6, 10)]);
    }

    #[test]
    fn test_debouncer_drops_superseded_keystrokes() {
        let d = Debouncer::new();
        let first = d.bump();
        let second = d.bump();
        assert!(!d.is_current(first));
        assert!(d.is_current(second));

        let third = d.bump();
        assert!(!d.is_current(second));
        assert!(d.is_current(third));
    }

    #[test]
    fn test_debouncer_clear_invalidates_pending() {
        let d = Debouncer::new();
        let pending = d.bump();
        d.clear();
        assert!(!d.is_current(pending));
    }

    #[test]
    fn test_debouncer_clones_share_generation() {
        let d = Debouncer::new();
        let timer_side = d.clone();
        let mine = d.bump();
        assert!(timer_side.is_current(mine));
        d.bump();
        assert!(!timer_side.is_current(mine));
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(Some(SortDirection::Asc)), " ▲");
        assert_eq!(get_sort_indicator(Some(SortDirection::Desc)), " ▼");
        assert_eq!(get_sort_indicator(None), " ⇅");
        assert_eq!(get_sort_class(None), "sort-icon");
    }
}
