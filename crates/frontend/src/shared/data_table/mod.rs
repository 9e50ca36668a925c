//! Generic client-side data-table controller.
//!
//! One [`DataTableController`] per table instance owns pagination, pending and
//! applied filters, sort, column visibility, request sequencing and the export
//! guard. It is plain data with no browser dependencies; [`hook`] wires it into
//! Leptos signals, the API gateway and persisted preferences.

pub mod columns;
pub mod controller;
pub mod csv;
pub mod error;
pub mod export;
pub mod filters;
pub mod hook;
pub mod lifecycle;
pub mod normalize;
pub mod pagination;
pub mod prefs;
pub mod row;
pub mod sort;
pub mod spec;

pub use columns::{ColumnDef, ColumnVisibility};
pub use controller::{DataTableController, ExportJob, FetchKey, FetchOutcome, FetchTicket, Phase};
pub use error::TableError;
pub use filters::{ClearPolicy, FilterState, FilterValue, ListFormat, NoFilters, TableFilters};
pub use hook::{use_data_table, DataTable};
pub use normalize::{Envelope, ListPage};
pub use pagination::{compute_page_numbers, last_page, NavDisabled, PageItem};
pub use row::TableRow;
pub use sort::{SortMap, SortState};
pub use spec::TableSpec;
