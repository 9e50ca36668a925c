use leptos::prelude::*;

use crate::layout::global_context::use_layout;

#[component]
pub fn Left(children: Children) -> impl IntoView {
    let layout = use_layout();

    view! {
        <aside data-zone="left" class="app-sidebar" class:app-sidebar--collapsed=move || !layout.left_open.get()>
            {children()}
        </aside>
    }
}
