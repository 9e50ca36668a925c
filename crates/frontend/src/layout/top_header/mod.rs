//! Top bar: sidebar toggle, product name, signed-in user and logout.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::layout::global_context::use_layout;
use crate::shared::config::AppConfig;
use crate::shared::data_table::prefs::LocalStoragePrefs;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
pub fn TopHeader() -> impl IntoView {
    let layout = use_layout();
    let auth = use_auth();
    let login_route = expect_context::<AppConfig>().auth.login_route;
    let navigate = use_navigate();

    let logout = move |_| {
        auth.sign_out(&LocalStoragePrefs);
        navigate(&login_route, NavigateOptions::default());
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| layout.toggle_left()
                    title=move || if layout.left_open.get() { "Collapse menu" } else { "Expand menu" }
                >
                    {move || if layout.left_open.get() { icon("chevron-left") } else { icon("chevron-right") }}
                </button>
                <span class="top-header__title">"Lead Desk"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    <span class="top-header__user-name">
                        {move || auth.user.with(|u| u.as_ref().map(|u| u.name.clone()).unwrap_or_default())}
                    </span>
                    <span class="top-header__user-role">
                        {move || auth.user.with(|u| u.as_ref().and_then(|u| u.role.clone()).unwrap_or_default())}
                    </span>
                </div>
                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("logout")}
                </button>
            </div>
        </header>
    }
}
