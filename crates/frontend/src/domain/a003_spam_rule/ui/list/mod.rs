pub mod state;

use contracts::domain::a003_spam_rule::dto::{SaveSpamRuleDto, SpamRuleDto, SPAM_RULE_TYPES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, Button, ButtonAppearance};

use self::state::{table_spec, SpamRuleFilters, FILTER_LABELS};
use crate::domain::a003_spam_rule::api;
use crate::shared::components::{
    AppliedFilterTags, DataGrid, FilterDrawer, MultiSelect, TablePagination, TableToolbar,
};
use crate::shared::config::AppConfig;
use crate::shared::data_table::{use_data_table, DataTable};
use crate::shared::icons::icon;
use crate::shared::modal_frame::{ConfirmDialog, FormField, FormModal, FormSelect, FormStatus};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

type SpamRuleTable = DataTable<SpamRuleDto, SpamRuleFilters>;

fn rule_types() -> Vec<String> {
    SPAM_RULE_TYPES.iter().map(|t| t.to_string()).collect()
}

#[component]
pub fn SpamRulesList() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let table: SpamRuleTable = use_data_table(table_spec(&config));
    // Some(None) is a new rule
    let editing = RwSignal::new(None::<Option<SpamRuleDto>>);
    let deleting = RwSignal::new(None::<SpamRuleDto>);
    let busy = RwSignal::new(false);

    let toggle_active = move |rule: SpamRuleDto| {
        let gateway = table.gateway();
        let message = if rule.is_active { "Rule disabled" } else { "Rule enabled" };
        spawn_local(async move {
            let dto = api::toggled(&rule);
            if let Err(e) = table.mutate(api::save(&gateway, &dto), message).await {
                log::debug!("spam rule {}: toggle failed: {}", rule.id, e);
            }
        });
    };

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(rule) = deleting.get_untracked() else {
            return;
        };
        busy.set(true);
        let gateway = table.gateway();
        spawn_local(async move {
            let result = table.mutate(api::remove(&gateway, rule.id), "Rule deleted").await;
            busy.try_set(false);
            if result.is_ok() {
                deleting.try_set(None);
            }
        });
    });

    let actions = Callback::new(move |rule: SpamRuleDto| {
        let for_toggle = rule.clone();
        let for_edit = rule.clone();
        let toggle_title = if rule.is_active { "Disable" } else { "Enable" };
        view! {
            <div class="row-actions">
                <button
                    class="button button--ghost"
                    on:click=move |_| toggle_active(for_toggle.clone())
                >
                    {toggle_title}
                </button>
                <button
                    class="button button--ghost"
                    title="Edit"
                    on:click=move |_| editing.set(Some(Some(for_edit.clone())))
                >
                    {icon("edit")}
                </button>
                <button
                    class="button button--ghost"
                    title="Delete"
                    on:click=move |_| deleting.set(Some(rule.clone()))
                >
                    {icon("trash")}
                </button>
            </div>
        }
        .into_any()
    });

    let custom_cell = Callback::new(move |(rule, key): (SpamRuleDto, &'static str)| match key {
        "is_active" if rule.is_active => {
            Some(view! { <span class="badge badge--success">"Active"</span> }.into_any())
        }
        "is_active" => Some(view! { <span class="badge badge--neutral">"Off"</span> }.into_any()),
        _ => None,
    });

    view! {
        <PageFrame page_id="a003_spam_rule--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Spam rules"</h1>
                    <Badge>{move || table.with(|c| c.total()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some(None))
                    >
                        {icon("plus")}
                        " New rule"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <TableToolbar table=table filters=true search_placeholder="Value…" />
                <AppliedFilterTags table=table labels=FILTER_LABELS />
                <DataGrid table=table actions=actions custom_cell=custom_cell />
                <TablePagination table=table />
            </div>

            <FilterDrawer
                is_open=Signal::derive(move || table.with(|c| c.is_drawer_open()))
                is_dirty=Signal::derive(move || table.with(|c| c.pending() != c.applied()))
                on_apply=Callback::new(move |_| table.apply_filters())
                on_clear=Callback::new(move |_| table.clear_filters())
                on_close=Callback::new(move |_| table.close_drawer())
            >
                <MultiSelect
                    label="Type"
                    options=Signal::derive(rule_types)
                    selected=Signal::derive(move || table.with(|c| c.pending().rule_types.clone()))
                    on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.rule_types = v))
                />
                <div class="form__group">
                    <label class="form__label" for="spam-active">"Active"</label>
                    <select
                        id="spam-active"
                        class="form__select"
                        prop:value=move || table.with(|c| c.pending().is_active.clone())
                        on:change=move |ev| {
                            let v = event_target_value(&ev);
                            table.update_pending(|f| f.is_active = v);
                        }
                    >
                        <option value="">"Any"</option>
                        <option value="1">"Active"</option>
                        <option value="0">"Disabled"</option>
                    </select>
                </div>
            </FilterDrawer>

            {move || editing.get().map(|rule| view! {
                <SpamRuleForm table=table rule=rule on_close=Callback::new(move |_| editing.set(None)) />
            })}

            {move || deleting.get().map(|rule| view! {
                <ConfirmDialog
                    message=format!("Delete the {} rule \"{}\"?", rule.rule_type, rule.value)
                    busy=busy
                    on_confirm=confirm_delete
                    on_close=Callback::new(move |_| deleting.set(None))
                />
            })}
        </PageFrame>
    }
}

#[component]
fn SpamRuleForm(
    table: SpamRuleTable,
    rule: Option<SpamRuleDto>,
    on_close: Callback<()>,
) -> impl IntoView {
    let id = rule.as_ref().map(|r| r.id);
    let title = match id {
        Some(_) => "Edit rule".to_string(),
        None => "New rule".to_string(),
    };
    let rule_type = RwSignal::new(rule.as_ref().map(|r| r.rule_type.clone()).unwrap_or_default());
    let value = RwSignal::new(rule.as_ref().map(|r| r.value.clone()).unwrap_or_default());
    let is_active = RwSignal::new(rule.as_ref().map(|r| r.is_active).unwrap_or(true));
    let status = FormStatus::new();
    let errors = status.field_errors();

    let submit = Callback::new(move |_: ()| {
        let dto = SaveSpamRuleDto {
            id,
            rule_type: rule_type.get_untracked(),
            value: value.get_untracked().trim().to_string(),
            is_active: is_active.get_untracked(),
        };
        status.begin();
        let gateway = table.gateway();
        spawn_local(async move {
            match table.mutate(api::save(&gateway, &dto), "Rule saved").await {
                Ok(_) => {
                    status.finish();
                    on_close.run(());
                }
                Err(e) => status.fail(&e),
            }
        });
    });

    view! {
        <FormModal
            title=title
            error=status.error
            saving=status.saving
            on_submit=submit
            on_close=on_close
        >
            <FormSelect
                label="Type"
                name="rule_type"
                value=rule_type
                options=Signal::derive(rule_types)
                errors=errors
            />
            <FormField label="Value" name="value" value=value errors=errors />
            <label class="form__checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || is_active.get()
                    on:change=move |ev| is_active.set(event_target_checked(&ev))
                />
                " Active"
            </label>
        </FormModal>
    }
}
