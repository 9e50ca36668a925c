pub mod column_picker;
pub mod filter_drawer;
pub mod multi_select;
pub mod pagination_controls;
pub mod table;
pub mod table_toolbar;

pub use column_picker::ColumnPicker;
pub use filter_drawer::{AppliedFilterTags, FilterButton, FilterDrawer, FilterTag};
pub use multi_select::MultiSelect;
pub use pagination_controls::PaginationControls;
pub use table::{DataGrid, SortableHeaderCell};
pub use table_toolbar::{TablePagination, TableToolbar};
