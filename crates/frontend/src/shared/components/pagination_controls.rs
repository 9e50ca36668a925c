use crate::shared::data_table::{compute_page_numbers, NavDisabled, PageItem};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// "Showing 26–50 of 60", or "No records" for an empty result.
pub fn range_label(page: u32, per_page: u32, total: u64) -> String {
    if total == 0 {
        return "No records".to_string();
    }
    let from = u64::from(page.saturating_sub(1)) * u64::from(per_page) + 1;
    let to = (from + u64::from(per_page) - 1).min(total);
    format!("Showing {}–{} of {}", from.min(total), to, total)
}

/// Page strip with first/prev/next/last buttons and a page-size select.
/// Pages are 1-indexed.
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<u32>,
    #[prop(into)] last_page: Signal<u32>,
    #[prop(into)] total_count: Signal<u64>,
    #[prop(into)] page_size: Signal<u32>,
    /// Disables every control while a request is in flight.
    #[prop(into)]
    loading: Signal<bool>,
    on_page_change: Callback<u32>,
    on_page_size_change: Callback<u32>,
    page_size_options: Vec<u32>,
) -> impl IntoView {
    let nav = Memo::new(move |_| NavDisabled::at(current_page.get(), last_page.get()));
    let items = Memo::new(move |_| compute_page_numbers(current_page.get(), last_page.get()));

    view! {
        <div class="pagination-controls">
            <span class="pagination-info">
                {move || range_label(current_page.get(), page_size.get(), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || loading.get() || nav.get().first
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1).max(1))
                disabled=move || loading.get() || nav.get().prev
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                items
                    .get()
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(n) => view! {
                            <button
                                class=move || {
                                    if current_page.get() == n {
                                        "pagination-btn pagination-btn--active"
                                    } else {
                                        "pagination-btn"
                                    }
                                }
                                on:click=move |_| on_page_change.run(n)
                                disabled=move || loading.get()
                            >
                                {n}
                            </button>
                        }
                        .into_any(),
                        PageItem::Ellipsis => view! {
                            <span class="pagination-ellipsis">"…"</span>
                        }
                        .into_any(),
                    })
                    .collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=move || loading.get() || nav.get().next
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(last_page.get())
                disabled=move || loading.get() || nav.get().last
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                disabled=move || loading.get()
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options
                    .iter()
                    .map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {format!("{} / page", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(1, 25, 0), "No records");
        assert_eq!(range_label(1, 25, 17), "Showing 1–17 of 17");
        assert_eq!(range_label(3, 25, 60), "Showing 51–60 of 60");
        assert_eq!(range_label(2, 50, 200), "Showing 51–100 of 200");
    }
}
