use super::columns::{ColumnDef, ColumnVisibility};
use super::error::TableError;
use super::filters::{encode_filters, FilterState, TableFilters};
use super::normalize::{merge_options, ListPage};
use super::pagination::{compute_page_numbers, last_page, NavDisabled, PageItem};
use super::prefs::{load_json, save_json, PrefStore};
use super::row::TableRow;
use super::sort::SortState;
use super::spec::TableSpec;
use contracts::shared::list_query::ListQuery;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Everything a fetch depends on. A change of key means a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchKey {
    pub query: ListQuery,
    pub nonce: u64,
}

/// Issued by [`DataTableController::begin_fetch`]; must be handed back with
/// the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: ListQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer request was issued; the response was dropped.
    Stale,
}

/// Snapshot handed to the export routine. Rows and columns feed the
/// client-side fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob<R> {
    pub endpoint: Option<&'static str>,
    pub pairs: Vec<(String, String)>,
    pub file_stem: &'static str,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<R>,
}

/// State machine for one table instance. See the module docs of
/// [`super`] for how it is driven.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTableController<R, F> {
    spec: TableSpec,
    config_error: Option<TableError>,

    page: u32,
    per_page: u32,
    total: u64,
    last_page: u32,
    rows: Vec<R>,

    phase: Phase,
    error: Option<TableError>,

    filters: FilterState<F>,
    search: String,
    sort: SortState,
    columns: ColumnVisibility,
    options: BTreeMap<String, Vec<String>>,

    drawer_open: bool,
    exporting: bool,
    nonce: u64,
    issued_seq: u64,
    applied_seq: u64,
}

impl<R: TableRow, F: TableFilters> DataTableController<R, F> {
    /// Validates `spec` and starts from its defaults.
    pub fn new(spec: TableSpec) -> Result<Self, TableError> {
        spec.validate()?;
        Ok(Self::from_valid(spec))
    }

    /// Like [`Self::new`], then restores persisted page size and hidden
    /// columns. Without persisted columns the factory default applies.
    pub fn with_prefs(spec: TableSpec, prefs: &dyn PrefStore) -> Result<Self, TableError> {
        let mut this = Self::new(spec)?;
        if let Some(per_page) = load_json::<u32>(prefs, &this.spec.per_page_key()) {
            if this.spec.page_sizes.contains(&per_page) {
                this.per_page = per_page;
            }
        }
        if let Some(hidden) = load_json::<Vec<String>>(prefs, &this.spec.hidden_cols_key()) {
            this.columns = ColumnVisibility::from_persisted(&this.spec.columns, hidden);
        }
        Ok(this)
    }

    /// Controller for a table spec that failed validation: shows the error and
    /// never issues a request.
    pub fn broken(spec: TableSpec, error: TableError) -> Self {
        let mut this = Self::from_valid(spec);
        this.phase = Phase::Errored;
        this.error = Some(error.clone());
        this.config_error = Some(error);
        this
    }

    fn from_valid(spec: TableSpec) -> Self {
        let columns = ColumnVisibility::defaults(&spec.columns, &spec.default_visible);
        Self {
            page: 1,
            per_page: spec.default_per_page,
            total: 0,
            last_page: 1,
            rows: Vec::new(),
            phase: Phase::Idle,
            error: None,
            filters: FilterState::default(),
            search: String::new(),
            sort: spec.default_sort.clone(),
            columns,
            options: spec.static_options.clone(),
            drawer_open: false,
            exporting: false,
            nonce: 0,
            issued_seq: 0,
            applied_seq: 0,
            config_error: None,
            spec,
        }
    }

    pub fn save_prefs(&self, prefs: &dyn PrefStore) {
        save_json(prefs, &self.spec.per_page_key(), &self.per_page);
        let hidden: Vec<&String> = self.columns.hidden().iter().collect();
        save_json(prefs, &self.spec.hidden_cols_key(), &hidden);
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn last_page(&self) -> u32 {
        self.last_page
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&TableError> {
        self.error.as_ref()
    }

    pub fn error_msg(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn pending(&self) -> &F {
        &self.filters.pending
    }

    pub fn applied(&self) -> &F {
        &self.filters.applied
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn hidden_columns(&self) -> &ColumnVisibility {
        &self.columns
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Request id of the rows on screen. Advances on every applied
    /// response, even one carrying the same ids as before.
    pub fn generation(&self) -> u64 {
        self.applied_seq
    }

    pub fn options(&self, key: &str) -> Vec<String> {
        self.options.get(key).cloned().unwrap_or_default()
    }

    /// Visible columns in declared order.
    pub fn visible_columns(&self) -> Vec<ColumnDef> {
        self.spec
            .columns
            .iter()
            .filter(|c| self.columns.is_visible(c))
            .cloned()
            .collect()
    }

    /// Visible, non-exempt columns: what an export contains.
    pub fn export_columns(&self) -> Vec<ColumnDef> {
        self.visible_columns()
            .into_iter()
            .filter(|c| !c.exempt)
            .collect()
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        compute_page_numbers(self.page, self.last_page)
    }

    pub fn nav_disabled(&self) -> NavDisabled {
        NavDisabled::at(self.page, self.last_page)
    }

    /// Query built from applied state only; pending filters never leak in.
    pub fn query(&self) -> ListQuery {
        let sort_field = self
            .sort
            .field
            .as_deref()
            .and_then(|key| self.spec.sort_map.to_backend(key))
            .map(str::to_string);
        ListQuery {
            current_page: self.page,
            per_page: self.per_page,
            search: self.search.clone(),
            sort_field,
            sort_direction: self.sort.direction,
            filters: encode_filters(
                &self.filters.applied,
                self.spec.list_format,
                self.spec.clear_policy,
            ),
        }
    }

    pub fn fetch_key(&self) -> FetchKey {
        FetchKey {
            query: self.query(),
            nonce: self.nonce,
        }
    }

    // ------------------------------------------------------------------
    // Fetch cycle
    // ------------------------------------------------------------------

    /// Enters `Loading` and issues the next request id. `None` when the
    /// table spec is broken.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.config_error.is_some() {
            return None;
        }
        self.issued_seq += 1;
        self.phase = Phase::Loading;
        self.error = None;
        Some(FetchTicket {
            seq: self.issued_seq,
            query: self.query(),
        })
    }

    /// Applies a response if it belongs to the latest request.
    ///
    /// Success replaces rows wholesale; failure clears them so no stale data
    /// sits under the error banner.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ListPage<R>, TableError>,
    ) -> FetchOutcome {
        if ticket.seq != self.issued_seq {
            log::debug!(
                "{}: dropping response #{} (latest #{})",
                self.spec.page_id,
                ticket.seq,
                self.issued_seq
            );
            return FetchOutcome::Stale;
        }
        self.applied_seq = ticket.seq;
        match result {
            Ok(page) => {
                self.rows = page.rows;
                self.total = page.total;
                self.last_page = last_page(page.total, self.per_page);
                merge_options(&self.spec.static_options, &mut self.options, page.options);
                self.phase = Phase::Loaded;
                if self.page > self.last_page {
                    // rows vanished under us (e.g. a delete on the last page)
                    self.page = self.last_page;
                }
            }
            Err(e) => {
                log::warn!("{}: fetch failed: {}", self.spec.page_id, e);
                self.rows.clear();
                self.phase = Phase::Errored;
                self.error = Some(e);
            }
        }
        FetchOutcome::Applied
    }

    /// Forces a refetch with unchanged parameters.
    pub fn refresh(&mut self) {
        self.nonce += 1;
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    pub fn set_page(&mut self, page: u32) {
        self.page = page.clamp(1, self.last_page.max(1));
    }

    /// Ignores sizes outside the allowed page sizes.
    pub fn set_per_page(&mut self, per_page: u32) -> bool {
        if !self.spec.page_sizes.contains(&per_page) {
            return false;
        }
        if self.per_page != per_page {
            self.per_page = per_page;
            self.last_page = last_page(self.total, per_page);
            self.page = 1;
        }
        true
    }

    // ------------------------------------------------------------------
    // Filters & search
    // ------------------------------------------------------------------

    pub fn update_pending(&mut self, f: impl FnOnce(&mut F)) {
        f(&mut self.filters.pending);
    }

    pub fn open_drawer(&mut self) {
        // the form starts from what is in effect
        self.filters.pending = self.filters.applied.clone();
        self.drawer_open = true;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    pub fn apply_filters(&mut self) {
        self.filters.apply();
        self.page = 1;
        self.drawer_open = false;
    }

    /// Clears one applied key (filter chip). Pending follows applied.
    pub fn remove_filter(&mut self, key: &str) {
        self.filters.applied.clear_key(key);
        self.filters.pending = self.filters.applied.clone();
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search.clear();
        self.page = 1;
        self.drawer_open = false;
        self.refresh();
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.applied.active_count() + usize::from(!self.search.trim().is_empty())
    }

    pub fn set_search(&mut self, text: &str) {
        if self.search != text {
            self.search = text.to_string();
            self.page = 1;
        }
    }

    // ------------------------------------------------------------------
    // Sort & columns
    // ------------------------------------------------------------------

    /// Returns `false` for columns that are not sortable.
    pub fn sort_by(&mut self, key: &str) -> bool {
        match self.spec.column(key) {
            Some(c) if c.sortable => {
                self.sort.click(key);
                self.page = 1;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_column(&mut self, key: &str) -> bool {
        self.columns.toggle(&self.spec.columns, key)
    }

    pub fn reset_columns(&mut self) {
        self.columns
            .reset(&self.spec.columns, &self.spec.default_visible);
    }

    pub fn show_all_columns(&mut self) {
        self.columns.show_all();
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Marks an export as running. `None` while another one is in flight.
    pub fn begin_export(&mut self) -> Option<ExportJob<R>> {
        if self.exporting {
            return None;
        }
        self.exporting = true;
        let columns = self.export_columns();
        let mut pairs = self.query().to_export_pairs();
        pairs.push(("compress".to_string(), "1".to_string()));
        pairs.push((
            "columns".to_string(),
            columns.iter().map(|c| c.key).collect::<Vec<_>>().join(","),
        ));
        Some(ExportJob {
            endpoint: self.spec.export_endpoint,
            pairs,
            file_stem: self.spec.page_id,
            columns,
            rows: self.rows.clone(),
        })
    }

    pub fn finish_export(&mut self) {
        self.exporting = false;
    }
}
