pub mod state;

use contracts::system::departments::{Department, SaveDepartmentDto};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, Button, ButtonAppearance};

use self::state::table_spec;
use crate::shared::components::{DataGrid, TablePagination, TableToolbar};
use crate::shared::config::AppConfig;
use crate::shared::data_table::{use_data_table, DataTable, NoFilters};
use crate::shared::icons::icon;
use crate::shared::modal_frame::{ConfirmDialog, FormField, FormModal, FormStatus};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::guard::RequireAdmin;
use crate::system::departments::api;

type DepartmentTable = DataTable<Department, NoFilters>;

#[component]
pub fn DepartmentsListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <DepartmentsList />
        </RequireAdmin>
    }
}

#[component]
fn DepartmentsList() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let table: DepartmentTable = use_data_table(table_spec(&config));
    // Some(None) is the create form
    let editing = RwSignal::new(None::<Option<Department>>);
    let deleting = RwSignal::new(None::<Department>);
    let busy = RwSignal::new(false);

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(department) = deleting.get_untracked() else {
            return;
        };
        busy.set(true);
        let gateway = table.gateway();
        spawn_local(async move {
            let result = table
                .mutate(api::remove(&gateway, &department), "Department deleted")
                .await;
            busy.try_set(false);
            if result.is_ok() {
                deleting.try_set(None);
            }
        });
    });

    let actions = Callback::new(move |department: Department| {
        let for_edit = department.clone();
        view! {
            <div class="row-actions">
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
                    on:click=move |_| deleting.set(Some(department.clone()))
                >
                    {icon("trash")}
                </button>
            </div>
        }
        .into_any()
    });

    view! {
        <PageFrame page_id="sys_departments--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Departments"</h1>
                    <Badge>{move || table.with(|c| c.total()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some(None))
                    >
                        {icon("plus")}
                        " New department"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <TableToolbar table=table search_placeholder="Name…" />
                <DataGrid table=table actions=actions />
                <TablePagination table=table />
            </div>

            {move || editing.get().map(|department| view! {
                <DepartmentForm
                    table=table
                    department=department
                    on_close=Callback::new(move |_| editing.set(None))
                />
            })}

            {move || deleting.get().map(|department| view! {
                <ConfirmDialog
                    message=format!("Delete department \"{}\"?", department.name)
                    busy=busy
                    on_confirm=confirm_delete
                    on_close=Callback::new(move |_| deleting.set(None))
                />
            })}
        </PageFrame>
    }
}

#[component]
fn DepartmentForm(
    table: DepartmentTable,
    department: Option<Department>,
    on_close: Callback<()>,
) -> impl IntoView {
    let id = department.as_ref().map(|d| d.id);
    let title = match &department {
        Some(d) => format!("Edit {}", d.name),
        None => "New department".to_string(),
    };
    let name = RwSignal::new(department.as_ref().map(|d| d.name.clone()).unwrap_or_default());
    let description = RwSignal::new(
        department
            .as_ref()
            .and_then(|d| d.description.clone())
            .unwrap_or_default(),
    );
    let status = FormStatus::new();
    let errors = status.field_errors();

    let submit = Callback::new(move |_: ()| {
        let dto = SaveDepartmentDto {
            id,
            name: name.get_untracked().trim().to_string(),
            description: description.get_untracked().trim().to_string(),
        };
        status.begin();
        let gateway = table.gateway();
        spawn_local(async move {
            match table.mutate(api::save(&gateway, &dto), "Department saved").await {
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
            <FormField label="Name" name="name" value=name errors=errors />
            <FormField label="Description" name="description" value=description errors=errors />
        </FormModal>
    }
}
