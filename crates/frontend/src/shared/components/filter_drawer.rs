use crate::shared::data_table::row::TableRow as RowData;
use crate::shared::data_table::{DataTable, TableFilters};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// `(key, "Label: value")` for every non-empty filter.
pub fn filter_tags<F: TableFilters>(
    filters: &F,
    labels: &[(&'static str, &'static str)],
) -> Vec<(&'static str, String)> {
    filters
        .entries()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            let label = labels
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, l)| *l)
                .unwrap_or(key);
            (key, format!("{}: {}", label, value.display()))
        })
        .collect()
}

/// Side drawer holding a page's filter form. Inputs edit the pending
/// filters; nothing is sent until Apply.
#[component]
pub fn FilterDrawer(
    #[prop(into)] is_open: Signal<bool>,
    /// Pending inputs differ from what is applied.
    #[prop(into)]
    is_dirty: Signal<bool>,
    on_apply: Callback<()>,
    on_clear: Callback<()>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <div class=move || {
            if is_open.get() { "filter-drawer filter-drawer--open" } else { "filter-drawer" }
        }>
            <div class="filter-drawer__backdrop" on:click=move |_| on_close.run(())></div>
            <aside class="filter-drawer__panel">
                <div class="filter-drawer__header">
                    {icon("filter")}
                    <span class="filter-drawer__title">"Filters"</span>
                    <button class="filter-drawer__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="filter-drawer__content">
                    <Show when=move || is_open.get()>{children()}</Show>
                </div>
                <div class="filter-drawer__footer">
                    <button class="button button--secondary" on:click=move |_| on_clear.run(())>
                        "Clear"
                    </button>
                    <button
                        class=move || {
                            if is_dirty.get() {
                                "button button--primary button--pulse"
                            } else {
                                "button button--primary"
                            }
                        }
                        on:click=move |_| on_apply.run(())
                    >
                        "Apply"
                    </button>
                </div>
            </aside>
        </div>
    }
}

/// Toolbar button that opens the drawer, badged with the active filter count.
#[component]
pub fn FilterButton(
    #[prop(into)] active_count: Signal<usize>,
    on_click: Callback<()>,
) -> impl IntoView {
    view! {
        <button class="button button--secondary" on:click=move |_| on_click.run(())>
            {icon("filter")}
            " Filters"
            {move || {
                let count = active_count.get();
                (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
            }}
        </button>
    }
}

/// Removable chip for one applied filter.
#[component]
pub fn FilterTag(#[prop(into)] label: String, on_remove: Callback<()>) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}

/// Chips for the applied filters. Removing one drops that key and refetches.
#[component]
pub fn AppliedFilterTags<R, F>(
    table: DataTable<R, F>,
    labels: &'static [(&'static str, &'static str)],
) -> impl IntoView
where
    R: RowData,
    F: TableFilters,
{
    view! {
        <div class="filter-tags">
            {move || {
                table
                    .with(|c| filter_tags(c.applied(), labels))
                    .into_iter()
                    .map(|(key, text)| view! {
                        <FilterTag label=text on_remove=Callback::new(move |_| table.remove_filter(key)) />
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::filters::tests::DemoFilters;

    #[test]
    fn test_filter_tags_skip_empty_and_use_labels() {
        let filters = DemoFilters {
            stages: vec!["new".into(), "won".into()],
            owner: String::new(),
        };
        assert_eq!(
            filter_tags(&filters, &[("stage", "Stage")]),
            vec![("stage", "Stage: new, won".to_string())]
        );

        let filters = DemoFilters {
            stages: vec![],
            owner: "ann".into(),
        };
        assert_eq!(filter_tags(&filters, &[]), vec![("owner", "owner: ann".to_string())]);
    }
}
