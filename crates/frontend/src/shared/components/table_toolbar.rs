use super::column_picker::ColumnPicker;
use super::filter_drawer::FilterButton;
use super::pagination_controls::PaginationControls;
use crate::shared::config::AppConfig;
use crate::shared::data_table::row::TableRow as RowData;
use crate::shared::data_table::{DataTable, TableFilters};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use leptos::prelude::*;

/// Search, filter, column, export and refresh controls above a table.
#[component]
pub fn TableToolbar<R, F>(
    table: DataTable<R, F>,
    /// Show the filter drawer button.
    #[prop(optional)]
    filters: bool,
    #[prop(optional, into)] search_placeholder: String,
    /// Extra buttons rendered at the right (e.g. "New").
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView
where
    R: RowData,
    F: TableFilters,
{
    let config = expect_context::<AppConfig>();
    let loading = Signal::derive(move || table.with(|c| c.is_loading()));
    let exporting = Signal::derive(move || table.with(|c| c.is_exporting()));

    view! {
        <div class="table-toolbar">
            <div class="table-toolbar__left">
                <SearchInput
                    value=Signal::derive(move || table.with(|c| c.search().to_string()))
                    on_change=Callback::new(move |text: String| table.set_search(&text))
                    debounce_ms=config.table.search_debounce_ms
                    placeholder=search_placeholder
                />
                {filters.then(|| view! {
                    <FilterButton
                        active_count=Signal::derive(move || table.with(|c| c.active_filter_count()))
                        on_click=Callback::new(move |_| table.open_drawer())
                    />
                })}
            </div>
            <div class="table-toolbar__right">
                <ColumnPicker table=table />
                <button
                    class="button button--secondary"
                    disabled=move || exporting.get()
                    on:click=move |_| table.export_csv()
                >
                    {icon("download")}
                    {move || if exporting.get() { " Exporting…" } else { " Export CSV" }}
                </button>
                <button
                    class="button button--ghost"
                    title="Refresh"
                    disabled=move || loading.get()
                    on:click=move |_| table.refresh()
                >
                    {icon("refresh")}
                </button>
                {children.map(|c| c())}
            </div>
        </div>
    }
}

/// Pagination strip bound to a table.
#[component]
pub fn TablePagination<R, F>(table: DataTable<R, F>) -> impl IntoView
where
    R: RowData,
    F: TableFilters,
{
    let sizes = table.with(|c| c.spec().page_sizes.clone());

    view! {
        <PaginationControls
            current_page=Signal::derive(move || table.with(|c| c.page()))
            last_page=Signal::derive(move || table.with(|c| c.last_page()))
            total_count=Signal::derive(move || table.with(|c| c.total()))
            page_size=Signal::derive(move || table.with(|c| c.per_page()))
            loading=Signal::derive(move || table.with(|c| c.is_loading()))
            on_page_change=Callback::new(move |p: u32| table.set_page(p))
            on_page_size_change=Callback::new(move |s: u32| table.set_per_page(s))
            page_size_options=sizes
        />
    }
}
