pub mod state;

use contracts::system::users::{CreateUserDto, UpdateUserDto, User, USER_ROLES};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, Button, ButtonAppearance};

use self::state::{form_from, table_spec, UserFilters, DEPARTMENT_OPTIONS, FILTER_LABELS};
use crate::shared::components::{
    AppliedFilterTags, DataGrid, FilterDrawer, MultiSelect, TablePagination, TableToolbar,
};
use crate::shared::config::AppConfig;
use crate::shared::data_table::{use_data_table, DataTable};
use crate::shared::icons::icon;
use crate::shared::modal_frame::{ConfirmDialog, FormField, FormModal, FormSelect, FormStatus};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::guard::RequireAdmin;
use crate::system::users::api;

type UserTable = DataTable<User, UserFilters>;

fn roles() -> Vec<String> {
    USER_ROLES.iter().map(|r| r.to_string()).collect()
}

#[component]
pub fn UsersListPage() -> impl IntoView {
    view! {
        <RequireAdmin>
            <UsersList />
        </RequireAdmin>
    }
}

#[component]
fn UsersList() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let table: UserTable = use_data_table(table_spec(&config));
    // Some(None) is the create form
    let editing = RwSignal::new(None::<Option<User>>);
    let deleting = RwSignal::new(None::<User>);
    let busy = RwSignal::new(false);

    let confirm_delete = Callback::new(move |_: ()| {
        let Some(user) = deleting.get_untracked() else {
            return;
        };
        busy.set(true);
        let gateway = table.gateway();
        spawn_local(async move {
            let result = table.mutate(api::remove(&gateway, user.id), "User deleted").await;
            busy.try_set(false);
            if result.is_ok() {
                deleting.try_set(None);
            }
        });
    });

    let actions = Callback::new(move |user: User| {
        let for_edit = user.clone();
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
                    on:click=move |_| deleting.set(Some(user.clone()))
                >
                    {icon("trash")}
                </button>
            </div>
        }
        .into_any()
    });

    let custom_cell = Callback::new(move |(user, key): (User, &'static str)| match key {
        "is_active" if user.is_active => {
            Some(view! { <span class="badge badge--success">"Active"</span> }.into_any())
        }
        "is_active" => Some(view! { <span class="badge badge--error">"Blocked"</span> }.into_any()),
        "role" if user.role.as_deref() == Some("admin") => {
            Some(view! { <span class="badge badge--warning">"admin"</span> }.into_any())
        }
        _ => None,
    });

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Users"</h1>
                    <Badge>{move || table.with(|c| c.total()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| editing.set(Some(None))
                    >
                        {icon("plus")}
                        " New user"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <TableToolbar table=table filters=true search_placeholder="Name or email…" />
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
                    label="Role"
                    options=Signal::derive(roles)
                    selected=Signal::derive(move || table.with(|c| c.pending().roles.clone()))
                    on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.roles = v))
                />
                <MultiSelect
                    label="Department"
                    options=Signal::derive(move || table.with(|c| c.options(DEPARTMENT_OPTIONS)))
                    selected=Signal::derive(move || table.with(|c| c.pending().departments.clone()))
                    on_change=Callback::new(move |v: Vec<String>| table.update_pending(|f| f.departments = v))
                />
                <div class="form__group">
                    <label class="form__label" for="user-active">"Status"</label>
                    <select
                        id="user-active"
                        class="form__select"
                        prop:value=move || table.with(|c| c.pending().is_active.clone())
                        on:change=move |ev| {
                            let v = event_target_value(&ev);
                            table.update_pending(|f| f.is_active = v);
                        }
                    >
                        <option value="">"Any"</option>
                        <option value="1">"Active"</option>
                        <option value="0">"Blocked"</option>
                    </select>
                </div>
            </FilterDrawer>

            {move || editing.get().map(|user| view! {
                <UserForm table=table user=user on_close=Callback::new(move |_| editing.set(None)) />
            })}

            {move || deleting.get().map(|user| view! {
                <ConfirmDialog
                    message=format!("Delete user {} <{}>?", user.name, user.email)
                    busy=busy
                    on_confirm=confirm_delete
                    on_close=Callback::new(move |_| deleting.set(None))
                />
            })}
        </PageFrame>
    }
}

/// Create form when `user` is `None`, edit form otherwise. Passwords are only
/// set on create.
#[component]
fn UserForm(table: UserTable, user: Option<User>, on_close: Callback<()>) -> impl IntoView {
    let id = user.as_ref().map(|u| u.id);
    let initial = user.as_ref().map(form_from).unwrap_or_default();
    let title = match &user {
        Some(u) => format!("Edit {}", u.name),
        None => "New user".to_string(),
    };

    let name = RwSignal::new(initial.name);
    let email = RwSignal::new(initial.email);
    let password = RwSignal::new(String::new());
    let department = RwSignal::new(initial.department);
    let role = RwSignal::new(initial.role);
    let is_active = RwSignal::new(id.is_none() || initial.is_active);
    let status = FormStatus::new();
    let errors = status.field_errors();

    let submit = Callback::new(move |_: ()| {
        status.begin();
        let gateway = table.gateway();
        let name = name.get_untracked().trim().to_string();
        let email = email.get_untracked().trim().to_string();
        let department = department.get_untracked();
        let role = role.get_untracked();
        let is_active = is_active.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let result = match id {
                Some(id) => {
                    let dto = UpdateUserDto {
                        name,
                        email,
                        department,
                        role,
                        is_active,
                    };
                    table.mutate(api::update(&gateway, id, &dto), "User updated").await
                }
                None => {
                    let dto = CreateUserDto {
                        name,
                        email,
                        password,
                        department,
                        role,
                    };
                    table.mutate(api::create(&gateway, &dto), "User created").await
                }
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
            <FormField label="Name" name="name" value=name errors=errors />
            <FormField label="Email" name="email" value=email errors=errors input_type="email" />
            {id.is_none().then(|| view! {
                <FormField label="Password" name="password" value=password errors=errors input_type="password" />
            })}
            <FormSelect
                label="Department"
                name="department"
                value=department
                options=Signal::derive(move || table.with(|c| c.options(DEPARTMENT_OPTIONS)))
                errors=errors
            />
            <FormSelect label="Role" name="role" value=role options=Signal::derive(roles) errors=errors />
            {id.is_some().then(|| view! {
                <label class="form__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || is_active.get()
                        on:change=move |ev| is_active.set(event_target_checked(&ev))
                    />
                    " Active"
                </label>
            })}
        </FormModal>
    }
}
