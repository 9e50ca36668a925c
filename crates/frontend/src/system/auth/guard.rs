use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::context::use_auth;
use crate::shared::config::AppConfig;

/// Renders children for a signed-in user, otherwise sends the browser to the
/// login route.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let login_route = expect_context::<AppConfig>().auth.login_route;

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=move || view! { <Redirect path=login_route.clone() /> }
        >
            {children()}
        </Show>
    }
}

/// Admin-only pages.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_admin()
            fallback=|| view! {
                <div class="page page--denied">
                    <h2>"Access denied"</h2>
                    <p>"This page is available to administrators only."</p>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
