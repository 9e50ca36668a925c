//! Sortable table header cell.
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Name"
//!     sort_field="name"
//!     direction=Signal::derive(move || table.with(|c| c.sort().direction_for("name")))
//!     on_sort=Callback::new(move |key: String| table.sort_by(&key))
//!     disabled=loading
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::list_query::SortDirection;
use leptos::prelude::*;
use thaw::*;

/// Header cell with a ▲/▼/⇅ indicator; clicking it reports `sort_field`.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    /// Logical column key.
    #[prop(into)]
    sort_field: String,
    /// Direction when the table is sorted by this column.
    #[prop(into)]
    direction: Signal<Option<SortDirection>>,
    on_sort: Callback<String>,
    /// Clicks are ignored while set (request in flight).
    #[prop(into)]
    disabled: Signal<bool>,
    #[prop(optional, default = 100.0)] min_width: f64,
) -> impl IntoView {
    let handle_click = move |_| {
        if !disabled.get_untracked() {
            on_sort.run(sort_field.clone());
        }
    };

    view! {
        <TableHeaderCell resizable=true min_width=min_width class="resizable">
            <div
                class="table__sortable-header"
                style="cursor: pointer; padding-right: 12px;"
                on:click=handle_click
            >
                {label}
                <span class=move || get_sort_class(direction.get())>
                    {move || get_sort_indicator(direction.get())}
                </span>
            </div>
        </TableHeaderCell>
    }
}
