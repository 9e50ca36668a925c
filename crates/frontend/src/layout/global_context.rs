use leptos::prelude::*;

use crate::shared::data_table::prefs::{load_json, save_json, LocalStoragePrefs, PrefStore};

const SIDEBAR_KEY: &str = "layout.sidebar_open";

/// Shell state shared by the header and the sidebar.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self::restore(&LocalStoragePrefs)
    }

    pub fn restore(store: &dyn PrefStore) -> Self {
        Self {
            left_open: RwSignal::new(load_json(store, SIDEBAR_KEY).unwrap_or(true)),
        }
    }

    pub fn toggle_left(&self) {
        let open = !self.left_open.get_untracked();
        self.left_open.set(open);
        save_json(&LocalStoragePrefs, SIDEBAR_KEY, &open);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_layout() -> AppGlobalContext {
    expect_context::<AppGlobalContext>()
}
