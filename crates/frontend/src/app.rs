use chrono::Utc;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::config::load_config;
use crate::shared::data_table::prefs::LocalStoragePrefs;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::{provide_auth, AuthContext};
use crate::system::auth::gateway::ApiGateway;

#[component]
pub fn App() -> impl IntoView {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid embedded config: {}", e);
            return view! {
                <div class="app-error">
                    <h1>"Configuration error"</h1>
                    <pre>{e.to_string()}</pre>
                </div>
            }
            .into_any();
        }
    };

    provide_context(ApiGateway::new(&config));
    provide_context(ToastService::new());
    provide_context(AppGlobalContext::new());
    provide_auth(AuthContext::restore(&LocalStoragePrefs, Utc::now()));
    provide_context(config);

    view! {
        <AppRoutes />
        <ToastHost />
    }
    .into_any()
}
