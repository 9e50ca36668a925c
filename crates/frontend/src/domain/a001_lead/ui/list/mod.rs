pub mod state;

use contracts::domain::a001_lead::dto::{LeadDto, LEAD_STATUSES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::Badge;
use web_sys::HtmlSelectElement;

use self::state::{
    status_of, table_spec, LeadFilters, CAMPAIGN_OPTIONS, FILTER_LABELS, SERVICE_OPTIONS,
    STAGE_OPTIONS, UTM_OPTIONS,
};
use crate::domain::a001_lead::api;
use crate::shared::components::{
    AppliedFilterTags, DataGrid, FilterDrawer, MultiSelect, TablePagination, TableToolbar,
};
use crate::shared::config::AppConfig;
use crate::shared::data_table::{use_data_table, DataTable, TableRow as _};
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use crate::shared::modal_frame::ConfirmDialog;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_toasts;

type LeadTable = DataTable<LeadDto, LeadFilters>;

#[component]
pub fn LeadsList() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let table: LeadTable = use_data_table(table_spec(&config));
    let toasts = use_toasts();
    let deleting = RwSignal::new(None::<LeadDto>);
    let busy = RwSignal::new(false);

    let change_status = move |id: i64, status: String, select: HtmlSelectElement| {
        let gateway = table.gateway();
        spawn_local(async move {
            let result = table
                .mutate(api::update_status(&gateway, id, &status), "Lead status updated")
                .await;
            if let Err(e) = result {
                log::debug!("lead {}: status not changed: {}", id, e);
                // no refetch on failure, so put the fetched status back
                let fetched = table.state.try_with_untracked(|c| status_of(c.rows(), id));
                if let Some(fetched) = fetched {
                    select.set_value(&fetched);
                }
            }
        });
    };

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(lead) = deleting.get_untracked() else {
            return;
        };
        busy.set(true);
        let gateway = table.gateway();
        spawn_local(async move {
            let result = table.mutate(api::remove(&gateway, lead.id), "Lead deleted").await;
            busy.try_set(false);
            if result.is_ok() {
                deleting.try_set(None);
            }
        });
    });

    let actions = Callback::new(move |lead: LeadDto| {
        let id = lead.id;
        let current = move || table.with(|c| status_of(c.rows(), id));
        view! {
            <div class="row-actions">
                <select
                    class="form__select form__select--inline"
                    title="Change status"
                    prop:value=current
                    on:change=move |ev| {
                        let next = event_target_value(&ev);
                        if next != current() {
                            change_status(id, next, event_target::<HtmlSelectElement>(&ev));
                        }
                    }
                >
                    {LEAD_STATUSES
                        .iter()
                        .map(|s| view! { <option value=*s>{*s}</option> })
                        .collect_view()}
                </select>
                <button
                    class="button button--ghost"
                    title="Delete"
                    on:click=move |_| deleting.set(Some(lead.clone()))
                >
                    {icon("trash")}
                </button>
            </div>
        }
        .into_any()
    });

    let custom_cell = Callback::new(move |(lead, key): (LeadDto, &'static str)| {
        match key {
            "status" => lead.status.map(|status| {
                let class = format!("badge badge--status-{}", status);
                view! { <span class=class>{status}</span> }.into_any()
            }),
            "name" | "email" => {
                let search = table.state.with_untracked(|c| c.search().to_string());
                Some(highlight_matches(&lead.cell(key), &search))
            }
            _ => None,
        }
    });

    let apply = Callback::new(move |_: ()| {
        match table.state.with_untracked(|c| c.pending().check_dates()) {
            Ok(()) => table.apply_filters(),
            Err(e) => toasts.warning(e.to_string()),
        }
    });

    view! {
        <PageFrame page_id="a001_lead--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Leads"</h1>
                    <Badge>{move || table.with(|c| c.total()).to_string()}</Badge>
                </div>
            </div>

            <div class="page__content">
                <TableToolbar table=table filters=true search_placeholder="Name, email or phone…" />
                <AppliedFilterTags table=table labels=FILTER_LABELS />
                <DataGrid table=table actions=actions custom_cell=custom_cell />
                <TablePagination table=table />
            </div>

            <FilterDrawer
                is_open=Signal::derive(move || table.with(|c| c.is_drawer_open()))
                is_dirty=Signal::derive(move || table.with(|c| c.pending() != c.applied()))
                on_apply=apply
                on_clear=Callback::new(move |_| table.clear_filters())
                on_close=Callback::new(move |_| table.close_drawer())
            >
                <LeadFilterForm table=table />
            </FilterDrawer>

            {move || deleting.get().map(|lead| {
                let name = lead.lead_name.clone().unwrap_or_else(|| format!("#{}", lead.id));
                view! {
                    <ConfirmDialog
                        message=format!("Delete lead \"{}\"?", name)
                        busy=busy
                        on_confirm=confirm_delete
                        on_close=Callback::new(move |_| deleting.set(None))
                    />
                }
            })}
        </PageFrame>
    }
}

/// Drawer body. Every input edits the pending filters only.
#[component]
fn LeadFilterForm(table: LeadTable) -> impl IntoView {
    let options = move |key: &'static str| Signal::derive(move || table.with(|c| c.options(key)));
    let pending = move |get: fn(&LeadFilters) -> Vec<String>| {
        Signal::derive(move || table.with(|c| get(c.pending())))
    };
    let text = move |get: fn(&LeadFilters) -> String| move || table.with(|c| get(c.pending()));

    view! {
        <MultiSelect
            label="Campaign"
            options=options(CAMPAIGN_OPTIONS)
            selected=pending(|f| f.campaigns.clone())
            on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.campaigns = v))
        />
        <MultiSelect
            label="Service"
            options=options(SERVICE_OPTIONS)
            selected=pending(|f| f.services.clone())
            on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.services = v))
        />
        <MultiSelect
            label="Stage"
            options=options(STAGE_OPTIONS)
            selected=pending(|f| f.stages.clone())
            on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.stages = v))
        />
        <MultiSelect
            label="UTM source"
            options=options(UTM_OPTIONS)
            selected=pending(|f| f.utm_sources.clone())
            on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.utm_sources = v))
        />
        <div class="form__group">
            <label class="form__label" for="lead-status">"Status"</label>
            <select
                id="lead-status"
                class="form__select"
                prop:value=text(|f| f.status.clone())
                on:change=move |ev| {
                    let v = event_target_value(&ev);
                    table.update_pending(|f| f.status = v);
                }
            >
                <option value="">"Any"</option>
                {LEAD_STATUSES
                    .iter()
                    .map(|s| view! { <option value=*s>{*s}</option> })
                    .collect_view()}
            </select>
        </div>
        <div class="form__row">
            <div class="form__group">
                <label class="form__label" for="lead-from">"Created from"</label>
                <input
                    id="lead-from"
                    type="date"
                    class="form__input"
                    prop:value=text(|f| f.date_from.clone())
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        table.update_pending(|f| f.date_from = v);
                    }
                />
            </div>
            <div class="form__group">
                <label class="form__label" for="lead-to">"to"</label>
                <input
                    id="lead-to"
                    type="date"
                    class="form__input"
                    prop:value=text(|f| f.date_to.clone())
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        table.update_pending(|f| f.date_to = v);
                    }
                />
            </div>
        </div>
    }
}
