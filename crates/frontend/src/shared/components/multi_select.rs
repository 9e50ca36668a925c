use leptos::prelude::*;

/// `selected` with `value` added, or removed if it was present. Order of the
/// remaining values is kept.
pub fn toggle_value(selected: &[String], value: &str) -> Vec<String> {
    if selected.iter().any(|v| v == value) {
        selected.iter().filter(|v| *v != value).cloned().collect()
    } else {
        let mut next = selected.to_vec();
        next.push(value.to_string());
        next
    }
}

/// Checklist for multi-value filters.
#[component]
pub fn MultiSelect(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] selected: Signal<Vec<String>>,
    on_change: Callback<Vec<String>>,
) -> impl IntoView {
    view! {
        <fieldset class="multi-select">
            <legend class="multi-select__label">{label}</legend>
            {move || {
                let current = selected.get();
                options
                    .get()
                    .into_iter()
                    .map(|option| {
                        let checked = current.contains(&option);
                        let value = option.clone();
                        view! {
                            <label class="multi-select__item">
                                <input
                                    type="checkbox"
                                    prop:checked=checked
                                    on:change=move |_| {
                                        let next = toggle_value(&selected.get_untracked(), &value);
                                        on_change.run(next);
                                    }
                                />
                                {option}
                            </label>
                        }
                    })
                    .collect_view()
            }}
            {move || {
                options.with(|o| o.is_empty()).then(|| view! {
                    <span class="multi-select__empty">"No options yet"</span>
                })
            }}
        </fieldset>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_value() {
        let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        assert_eq!(toggle_value(&s(&["a", "b"]), "c"), s(&["a", "b", "c"]));
        assert_eq!(toggle_value(&s(&["a", "b", "c"]), "b"), s(&["a", "c"]));
        assert_eq!(toggle_value(&[], "a"), s(&["a"]));
    }
}
