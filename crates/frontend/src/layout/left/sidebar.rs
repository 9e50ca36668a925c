use leptos::prelude::*;
use leptos_router::components::A;

use crate::layout::global_context::use_layout;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub admin_only: bool,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem { href: "/leads", label: "Leads", icon: "leads", admin_only: false },
    NavItem { href: "/contacts", label: "Contacts", icon: "contacts", admin_only: false },
    NavItem { href: "/spam-rules", label: "Spam rules", icon: "shield", admin_only: false },
    NavItem { href: "/users", label: "Users", icon: "users", admin_only: true },
    NavItem { href: "/departments", label: "Departments", icon: "departments", admin_only: true },
];

/// Menu entries the current user may open.
pub fn nav_items(is_admin: bool) -> Vec<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| is_admin || !item.admin_only)
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth();
    let layout = use_layout();

    view! {
        <nav class="app-sidebar__content">
            {move || {
                nav_items(auth.is_admin())
                    .into_iter()
                    .map(|item| view! {
                        <A href=item.href attr:class="app-sidebar__item" attr:title=item.label>
                            {icon(item.icon)}
                            <Show when=move || layout.left_open.get()>
                                <span class="app-sidebar__label">{item.label}</span>
                            </Show>
                        </A>
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_sees_system_pages() {
        let hrefs = |admin| nav_items(admin).iter().map(|i| i.href).collect::<Vec<_>>();
        assert_eq!(hrefs(false), vec!["/leads", "/contacts", "/spam-rules"]);
        assert_eq!(hrefs(true).len(), 5);
        assert!(hrefs(true).contains(&"/departments"));
    }
}
