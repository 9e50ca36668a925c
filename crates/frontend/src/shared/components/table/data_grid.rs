use super::SortableHeaderCell;
use crate::shared::data_table::columns::{ACTIONS_KEY, ROW_NUMBER_KEY};
use crate::shared::data_table::row::TableRow as RowData;
use crate::shared::data_table::{DataTable, TableFilters};
use leptos::prelude::*;
use thaw::{Table, TableBody, TableCell, TableHeader, TableHeaderCell, TableRow};

/// Renders the controller's visible columns and current rows, plus the
/// loading, error and empty states.
#[component]
pub fn DataGrid<R, F>(
    table: DataTable<R, F>,
    /// Content of the actions column for a row.
    #[prop(optional)]
    actions: Option<Callback<R, AnyView>>,
    /// Custom rendering for some cells; `None` falls back to the text value.
    #[prop(optional)]
    custom_cell: Option<Callback<(R, &'static str), Option<AnyView>>>,
) -> impl IntoView
where
    R: RowData,
    F: TableFilters,
{
    let columns = Memo::new(move |_| table.with(|c| c.visible_columns()));
    let loading = Signal::derive(move || table.with(|c| c.is_loading()));
    let offset = Memo::new(move |_| table.with(|c| c.page().saturating_sub(1) * c.per_page()));

    let header = move || {
        columns
            .get()
            .into_iter()
            .map(|col| {
                if col.sortable {
                    let key = col.key;
                    view! {
                        <SortableHeaderCell
                            label=col.label
                            sort_field=key
                            direction=Signal::derive(move || {
                                table.with(|c| c.sort().direction_for(key))
                            })
                            on_sort=Callback::new(move |k: String| table.sort_by(&k))
                            disabled=loading
                        />
                    }
                    .into_any()
                } else {
                    view! { <TableHeaderCell min_width=60.0>{col.label}</TableHeaderCell> }
                        .into_any()
                }
            })
            .collect_view()
    };

    let rows = move || {
        let base = offset.get();
        table.with(|c| {
            let generation = c.generation();
            c.rows()
                .iter()
                .cloned()
                .enumerate()
                .map(|(i, r)| {
                    let n = base + i as u32 + 1;
                    (row_key(generation, n, &r.row_id()), n, r)
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        {move || {
            table.with(|c| c.error_msg()).map(|msg| view! {
                <div class="alert alert--error">
                    <span>{msg}</span>
                    <button class="button button--ghost" on:click=move |_| table.refresh()>
                        "Retry"
                    </button>
                </div>
            })
        }}
        <div class=move || {
            if loading.get() { "table-wrapper table-wrapper--loading" } else { "table-wrapper" }
        }>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>{header}</TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=rows
                        key=|(k, _, _)| k.clone()
                        children=move |(_, n, row)| {
                            let id = row.row_id();
                            let cells = move || {
                                columns
                                    .get()
                                    .into_iter()
                                    .map(|col| {
                                        let content = match col.key {
                                            ROW_NUMBER_KEY => n.to_string().into_any(),
                                            ACTIONS_KEY => actions
                                                .map(|a| a.run(row.clone()))
                                                .unwrap_or_else(|| view! { <></> }.into_any()),
                                            key => custom_cell
                                                .and_then(|c| c.run((row.clone(), key)))
                                                .unwrap_or_else(|| row.cell(key).into_any()),
                                        };
                                        view! { <TableCell>{content}</TableCell> }
                                    })
                                    .collect_view()
                            };
                            view! { <TableRow attr:data-id=id>{cells}</TableRow> }
                        }
                    />
                </TableBody>
            </Table>
            <Show when=move || table.with(|c| c.rows().is_empty() && !c.is_loading() && c.error().is_none())>
                <div class="table-empty">"No records found"</div>
            </Show>
            <Show when=move || loading.get()>
                <div class="table-loading">"Loading…"</div>
            </Show>
        </div>
    }
}

/// `For` only rebuilds rows whose key it has not seen, so the key carries
/// the fetch generation: a refetch re-renders rows even when ids repeat.
fn row_key(generation: u64, n: u32, id: &str) -> String {
    format!("{generation}:{id}@{n}")
}

#[cfg(test)]
mod tests {
    use super::row_key;

    #[test]
    fn test_row_key_changes_on_refetch() {
        assert_ne!(row_key(1, 1, "7"), row_key(2, 1, "7"));
    }

    #[test]
    fn test_row_key_distinct_within_page() {
        assert_ne!(row_key(3, 1, "7"), row_key(3, 2, "7"));
        assert_ne!(row_key(3, 1, "7"), row_key(3, 1, "8"));
        assert_eq!(row_key(3, 1, "7"), row_key(3, 1, "7"));
    }
}
