use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_lead::ui::list::LeadsList;
use crate::domain::a002_contact::ui::list::ContactsList;
use crate::domain::a003_spam_rule::ui::list::SpamRulesList;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::departments::ui::list::DepartmentsListPage;
use crate::system::pages::login::{LoginPage, HOME_ROUTE};
use crate::system::users::ui::list::UsersListPage;

/// Signed-in area: the shell around whichever page matched.
#[component]
fn ProtectedLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <Shell>
                <Outlet />
            </Shell>
        </RequireAuth>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h2>"Page not found"</h2>
            <a href=HOME_ROUTE>"Back to leads"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/login") view=LoginPage />
                <ParentRoute path=path!("") view=ProtectedLayout>
                    <Route path=path!("") view=|| view! { <Redirect path=HOME_ROUTE /> } />
                    <Route path=path!("/leads") view=LeadsList />
                    <Route path=path!("/contacts") view=ContactsList />
                    <Route path=path!("/spam-rules") view=SpamRulesList />
                    <Route path=path!("/users") view=UsersListPage />
                    <Route path=path!("/departments") view=DepartmentsListPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
