pub mod data_grid;
pub mod sortable_header_cell;

pub use data_grid::DataGrid;
pub use sortable_header_cell::SortableHeaderCell;
