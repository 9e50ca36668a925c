pub mod state;

use contracts::domain::a002_contact::dto::{ContactDto, ContactFormDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, Button, ButtonAppearance};

use self::state::{
    form_from, full_name, table_spec, ContactFilters, FILTER_LABELS, OWNER_OPTIONS,
    SOURCE_OPTIONS,
};
use crate::domain::a002_contact::api;
use crate::shared::components::{
    AppliedFilterTags, DataGrid, FilterDrawer, MultiSelect, TablePagination, TableToolbar,
};
use crate::shared::config::AppConfig;
use crate::shared::data_table::{use_data_table, DataTable};
use crate::shared::icons::icon;
use crate::shared::modal_frame::{ConfirmDialog, FormField, FormModal, FormSelect, FormStatus};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

type ContactTable = DataTable<ContactDto, ContactFilters>;

/// What the form dialog is editing.
#[derive(Clone, PartialEq)]
enum Editing {
    New,
    Existing(ContactDto),
}

#[component]
pub fn ContactsList() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let table: ContactTable = use_data_table(table_spec(&config));
    let editing = RwSignal::new(None::<Editing>);
    let deleting = RwSignal::new(None::<ContactDto>);
    let busy = RwSignal::new(false);

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(contact) = deleting.get_untracked() else {
            return;
        };
        busy.set(true);
        let gateway = table.gateway();
        spawn_local(async move {
            let result = table
                .mutate(api::remove(&gateway, contact.id), "Contact deleted")
                .await;
            busy.try_set(false);
            if result.is_ok() {
                deleting.try_set(None);
            }
        });
    });

    let actions = Callback::new(move |contact: ContactDto| {
        let for_edit = contact.clone();
        view! {
            <div class="row-actions">
                <button
                    class="button button--ghost"
                    title="Edit"
                    on:click=move |_| editing.set(Some(Editing::Existing(for_edit.clone())))
                >
                    {icon("edit")}
                </button>
                <button
                    class="button button--ghost"
                    title="Delete"
                    on:click=move |_| deleting.set(Some(contact.clone()))
                >
                    {icon("trash")}
                </button>
            </div>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="a002_contact--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Contacts"</h1>
                    <Badge>{move || table.with(|c| c.total()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some(Editing::New))
                    >
                        {icon("plus")}
                        " New contact"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <TableToolbar table=table filters=true search_placeholder="Name, email or company…" />
                <AppliedFilterTags table=table labels=FILTER_LABELS />
                <DataGrid table=table actions=actions />
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
                    label="Source"
                    options=Signal::derive(move || table.with(|c| c.options(SOURCE_OPTIONS)))
                    selected=Signal::derive(move || table.with(|c| c.pending().sources.clone()))
                    on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.sources = v))
                />
                <div class="form__group">
                    <label class="form__label" for="contact-owner">"Owner"</label>
                    <select
                        id="contact-owner"
                        class="form__select"
                        prop:value=move || table.with(|c| c.pending().owner.clone())
                        on:change=move |ev| {
                            let v = event_target_value(&ev);
                            table.update_pending(|f| f.owner = v);
                        }
                    >
                        <option value="">"All"</option>
                        {move || {
                            table
                                .with(|c| c.options(OWNER_OPTIONS))
                                .into_iter()
                                .map(|o| {
                                    let value = o.clone();
                                    view! { <option value=value>{o}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </div>
            </FilterDrawer>

            {move || editing.get().map(|target| view! {
                <ContactForm table=table target=target on_close=Callback::new(move |_| editing.set(None)) />
            })}

            {move || deleting.get().map(|contact| view! {
                <ConfirmDialog
                    message=format!("Delete contact \"{}\"?", full_name(&contact))
                    busy=busy
                    on_confirm=confirm_delete
                    on_close=Callback::new(move |_| deleting.set(None))
                />
            })}
        </PageFrame>
    }
}

#[component]
fn ContactForm(table: ContactTable, target: Editing, on_close: Callback<()>) -> impl IntoView {
    let (id, initial) = match &target {
        Editing::New => (None, ContactFormDto::default()),
        Editing::Existing(contact) => (Some(contact.id), form_from(contact)),
    };
    let title = match id {
        Some(_) => "Edit contact".to_string(),
        None => "New contact".to_string(),
    };

    let first_name = RwSignal::new(initial.first_name);
    let last_name = RwSignal::new(initial.last_name);
    let email = RwSignal::new(initial.email);
    let phone = RwSignal::new(initial.phone);
    let company = RwSignal::new(initial.company);
    let source = RwSignal::new(initial.source);
    let status = FormStatus::new();
    let errors = status.field_errors();

    let submit = Callback::new(move |_: ()| {
        let dto = ContactFormDto {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked(),
            company: company.get_untracked(),
            source: source.get_untracked(),
        };
        status.begin();
        let gateway = table.gateway();
        spawn_local(async move {
            let result = match id {
                Some(id) => {
                    table
                        .mutate(api::update(&gateway, id, &dto), "Contact updated")
                        .await
                }
                None => table.mutate(api::create(&gateway, &dto), "Contact created").await,
            };
            match result {
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
            <FormField label="First name" name="first_name" value=first_name errors=errors />
            <FormField label="Last name" name="last_name" value=last_name errors=errors />
            <FormField label="Email" name="email" value=email errors=errors input_type="email" />
            <FormField label="Phone" name="phone" value=phone errors=errors input_type="tel" />
            <FormField label="Company" name="company" value=company errors=errors />
            <FormSelect
                label="Source"
                name="source"
                value=source
                options=Signal::derive(move || table.with(|c| c.options(SOURCE_OPTIONS)))
                errors=errors
            />
        </FormModal>
    }
}
