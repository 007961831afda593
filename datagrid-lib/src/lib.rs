//! Headless data tables
//!
//! Client- or server-paginated tables with quick, column and global filters,
//! row selection, confirmable bulk actions, persisted column configuration
//! and CSV export. Rendering is left to the caller: [`DataTable::view`]
//! returns plain data, and [`render::render_text`] draws it for terminals.

pub mod action;
pub mod column;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod render;
pub mod selection;
pub mod sort;
pub mod store;
pub mod table;

pub use table::{DataTable, DataTableBuilder};

pub mod prelude {
    pub use crate::action::{ActionVariant, BulkAction, BulkOutcome, ConfirmOptions, Confirmer};
    pub use crate::column::{CellValue, ColumnConfig, ColumnDef, Header, PinSide};
    pub use crate::config::{ExportColumn, SelectionClearPolicy, TableConfig};
    pub use crate::error::{BulkActionError, ExportError, FetchError, StoreError};
    pub use crate::export::CsvExport;
    pub use crate::filter::{ColumnFilter, FilterOp, QuickFilter};
    pub use crate::pagination::{
        PageFetcher, PageRequest, PageResponse, PaginationMode, PaginationState, fetcher_fn,
    };
    pub use crate::render::render_text;
    pub use crate::selection::CheckState;
    pub use crate::sort::{SortDirection, SortState};
    pub use crate::store::{ConfigStore, MemoryStore};
    #[cfg(feature = "sqlite")]
    pub use crate::store::SqliteStore;
    pub use crate::table::{
        BodyLayout, DataTable, DataTableBuilder, MobileCard, TableBody, TableView,
    };
}
