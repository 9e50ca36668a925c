use crate::shared::data_table::row::TableRow as RowData;
use crate::shared::data_table::{DataTable, TableFilters};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// "Columns" dropdown: a checkbox per hideable column plus reset/show-all.
#[component]
pub fn ColumnPicker<R, F>(table: DataTable<R, F>) -> impl IntoView
where
    R: RowData,
    F: TableFilters,
{
    let open = RwSignal::new(false);
    let choices = Memo::new(move |_| {
        table.with(|c| {
            c.spec()
                .columns
                .iter()
                .filter(|col| !col.exempt)
                .map(|col| (col.key, col.label, c.hidden_columns().is_visible(col)))
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div class="column-picker">
            <button class="button button--secondary" on:click=move |_| open.update(|o| *o = !*o)>
                {icon("columns")}
                " Columns"
            </button>
            <Show when=move || open.get()>
                <div class="column-picker__menu">
                    {move || {
                        choices
                            .get()
                            .into_iter()
                            .map(|(key, label, visible)| view! {
                                <label class="column-picker__item">
                                    <input
                                        type="checkbox"
                                        prop:checked=visible
                                        on:change=move |_| table.toggle_column(key)
                                    />
                                    {label}
                                </label>
                            })
                            .collect_view()
                    }}
                    <div class="column-picker__actions">
                        <button class="button button--ghost" on:click=move |_| table.reset_columns()>
                            "Reset"
                        </button>
                        <button class="button button--ghost" on:click=move |_| table.show_all_columns()>
                            "Show all"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
