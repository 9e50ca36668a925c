//! Leptos wiring for [`DataTableController`].
//!
//! The controller lives in one `RwSignal`. A memo over its fetch key drives an
//! effect that issues the request; completions are applied only while the
//! owning component is mounted.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use std::future::Future;

use super::controller::DataTableController;
use super::error::TableError;
use super::export::{run_export, ExportSettings};
use super::filters::TableFilters;
use super::lifecycle::Liveness;
use super::normalize::normalize;
use super::prefs::LocalStoragePrefs;
use super::row::TableRow;
use super::spec::TableSpec;
use crate::shared::config::AppConfig;
use crate::shared::toast::ToastService;
use crate::system::auth::gateway::ApiGateway;

/// Handle to one mounted table. Cheap to copy into view closures.
pub struct DataTable<R: TableRow, F: TableFilters> {
    pub state: RwSignal<DataTableController<R, F>>,
    gateway: StoredValue<ApiGateway>,
    liveness: StoredValue<Liveness>,
    export_settings: ExportSettings,
    toasts: ToastService,
}

impl<R: TableRow, F: TableFilters> Clone for DataTable<R, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: TableRow, F: TableFilters> Copy for DataTable<R, F> {}

/// Creates the controller for `spec`, restores persisted preferences and
/// starts fetching. Needs `AppConfig`, `ApiGateway` and `ToastService` in
/// context.
pub fn use_data_table<R, F>(spec: TableSpec) -> DataTable<R, F>
where
    R: TableRow + DeserializeOwned,
    F: TableFilters,
{
    let config = expect_context::<AppConfig>();
    let gateway = expect_context::<ApiGateway>();
    let toasts = expect_context::<ToastService>();

    let controller = match DataTableController::with_prefs(spec.clone(), &LocalStoragePrefs) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            DataTableController::broken(spec, e)
        }
    };
    let envelope = controller.spec().envelope;
    let endpoint = controller.spec().endpoint;
    let state = RwSignal::new(controller);

    let liveness = Liveness::new();
    on_cleanup({
        let liveness = liveness.clone();
        move || liveness.end()
    });

    let table = DataTable {
        state,
        gateway: StoredValue::new(gateway),
        liveness: StoredValue::new(liveness),
        export_settings: ExportSettings::from_config(&config),
        toasts,
    };

    let fetch_key = Memo::new(move |_| state.with(|c| c.fetch_key()));
    Effect::new(move |_| {
        fetch_key.track();
        let Some(ticket) = state.try_update(|c| c.begin_fetch()).flatten() else {
            return;
        };
        let gateway = table.gateway.get_value();
        let alive = table.liveness.get_value();
        spawn_local(async move {
            let result = match gateway.get_json(endpoint, &ticket.query.to_pairs()).await {
                Ok(body) => normalize::<R>(envelope, body, &ticket.query),
                Err(e) => Err(e),
            };
            if !alive.is_alive() {
                log::debug!("{}: response after unmount dropped", endpoint);
                return;
            }
            state.try_update(|c| c.complete_fetch(&ticket, result));
        });
    });

    let prefs = Memo::new(move |_| {
        state.with(|c| (c.per_page(), c.hidden_columns().clone()))
    });
    Effect::new(move |prev: Option<()>| {
        prefs.track();
        // the first run only reflects what was just loaded
        if prev.is_some() {
            state.with_untracked(|c| c.save_prefs(&LocalStoragePrefs));
        }
    });

    table
}

impl<R: TableRow, F: TableFilters> DataTable<R, F> {
    /// Reactive read.
    pub fn with<T>(&self, f: impl FnOnce(&DataTableController<R, F>) -> T) -> T {
        self.state.with(f)
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut DataTableController<R, F>) -> T) -> Option<T> {
        self.state.try_update(f)
    }

    pub fn set_page(&self, page: u32) {
        self.update(|c| c.set_page(page));
    }

    pub fn set_per_page(&self, per_page: u32) {
        self.update(|c| c.set_per_page(per_page));
    }

    pub fn sort_by(&self, key: &str) {
        self.update(|c| c.sort_by(key));
    }

    pub fn set_search(&self, text: &str) {
        self.update(|c| c.set_search(text));
    }

    pub fn update_pending(&self, f: impl FnOnce(&mut F)) {
        self.update(|c| c.update_pending(f));
    }

    pub fn open_drawer(&self) {
        self.update(|c| c.open_drawer());
    }

    pub fn close_drawer(&self) {
        self.update(|c| c.close_drawer());
    }

    pub fn apply_filters(&self) {
        self.update(|c| c.apply_filters());
    }

    pub fn remove_filter(&self, key: &str) {
        self.update(|c| c.remove_filter(key));
    }

    pub fn clear_filters(&self) {
        self.update(|c| c.clear_filters());
    }

    pub fn toggle_column(&self, key: &str) {
        self.update(|c| c.toggle_column(key));
    }

    pub fn reset_columns(&self) {
        self.update(|c| c.reset_columns());
    }

    pub fn show_all_columns(&self) {
        self.update(|c| c.show_all_columns());
    }

    pub fn refresh(&self) {
        self.update(|c| c.refresh());
    }

    pub fn gateway(&self) -> ApiGateway {
        self.gateway.get_value()
    }

    /// Starts a CSV export unless one is already running.
    pub fn export_csv(&self) {
        let Some(job) = self.update(|c| c.begin_export()).flatten() else {
            log::debug!("export already running");
            return;
        };
        let table = *self;
        let gateway = self.gateway.get_value();
        let alive = self.liveness.get_value();
        spawn_local(async move {
            match run_export(&gateway, job, table.export_settings).await {
                Ok(outcome) if outcome.is_degraded() => table.toasts.warning(outcome.message()),
                Ok(outcome) => table.toasts.success(outcome.message()),
                Err(e) => table.toasts.error(e.to_string()),
            }
            if alive.is_alive() {
                table.update(|c| c.finish_export());
            }
        });
    }

    /// Awaits a create/update/remove call, reports it and refetches on
    /// success. Rows are never patched locally.
    pub async fn mutate<T>(
        self,
        action: impl Future<Output = Result<T, TableError>>,
        success: &str,
    ) -> Result<T, TableError> {
        let alive = self.liveness.get_value();
        let result = action.await;
        match &result {
            Ok(_) => {
                self.toasts.success(success);
                if alive.is_alive() {
                    self.refresh();
                }
            }
            Err(e) => self.toasts.error(e.to_string()),
        }
        result
    }
}
