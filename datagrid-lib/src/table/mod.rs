//! DataTable - a headless table with pagination, filtering, selection,
//! bulk actions, column configuration and CSV export.
//!
//! The table owns no rendering. [`DataTable::view`] produces a plain-data
//! [`TableView`] that a frontend (or [`crate::render::render_text`]) turns
//! into pixels or characters.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::prelude::*;
//!
//! #[derive(Clone, Debug)]
//! struct Contact { id: u32, name: String, email: String }
//!
//! let columns = vec![
//!     ColumnDef::new("name", "Name", |c: &Contact| c.name.clone().into()),
//!     ColumnDef::new("email", "Email", |c: &Contact| c.email.clone().into()),
//! ];
//! let rows = vec![
//!     Contact { id: 1, name: "Ada".into(), email: "ada@example.com".into() },
//!     Contact { id: 2, name: "Grace".into(), email: "grace@example.com".into() },
//! ];
//!
//! let table = DataTable::builder(columns)
//!     .with_rows(rows)
//!     .with_row_id(|c: &Contact, _| c.id.to_string())
//!     .build();
//!
//! table.set_global_filter("grace");
//! assert_eq!(table.rows().len(), 1);
//! ```

mod actions;
mod row_model;
mod view;

pub use row_model::RowModel;
pub use view::{
    BodyLayout, BulkBar, BulkButton, FilterField, Footer, HeaderCell, HeaderRow, MobileCard,
    QuickFilterChip, TableBody, TableView, Toolbar, ViewCard, ViewRow,
};

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::action::{BulkAction, Confirmer};
use crate::column::{ColumnConfig, ColumnConfigManager, ColumnDef, PinSide};
use crate::config::TableConfig;
use crate::error::ExportError;
use crate::export::{CsvExport, export_rows};
use crate::filter::{ColumnFilter, QuickFilter, QuickFilterSet};
use crate::pagination::{PageFetcher, Pagination, PaginationMode, PaginationState};
use crate::selection::Selection;
use crate::sort::{SortState, next_sort};

/// Derives a stable row id from a row and its index in the source rows.
pub type RowIdFn<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Notified with the selected rows whenever the selection changes.
pub type SelectionCallback<T> = Arc<dyn Fn(&[T]) + Send + Sync>;

/// Renders a row as a card for narrow viewports.
pub type MobileCardFn<T> = Arc<dyn Fn(&T) -> MobileCard + Send + Sync>;

/// Internal state for the DataTable.
pub(crate) struct TableInner<T> {
    /// Client-mode rows. Unused in server mode.
    pub rows: Vec<T>,
    pub quick_filters: QuickFilterSet<T>,
    pub column_filters: BTreeMap<String, ColumnFilter>,
    pub global_filter: String,
    pub sort: Option<SortState>,
    pub selection: Selection,
    pub columns: ColumnConfigManager,
}

/// A headless data table.
///
/// Cheap to clone; clones share state, so an async page change or bulk
/// action can run on one handle while another renders.
pub struct DataTable<T> {
    columns: Arc<Vec<ColumnDef<T>>>,
    config: Arc<TableConfig>,
    pub(crate) inner: Arc<RwLock<TableInner<T>>>,
    pagination: Pagination<T>,
    bulk_actions: Arc<Vec<BulkAction<T>>>,
    confirmer: Option<Arc<dyn Confirmer>>,
    row_id: Option<RowIdFn<T>>,
    on_selection_change: Option<SelectionCallback<T>>,
    mobile_card: Option<MobileCardFn<T>>,
}

impl<T> Clone for DataTable<T> {
    fn clone(&self) -> Self {
        Self {
            columns: Arc::clone(&self.columns),
            config: Arc::clone(&self.config),
            inner: Arc::clone(&self.inner),
            pagination: self.pagination.clone(),
            bulk_actions: Arc::clone(&self.bulk_actions),
            confirmer: self.confirmer.clone(),
            row_id: self.row_id.clone(),
            on_selection_change: self.on_selection_change.clone(),
            mobile_card: self.mobile_card.clone(),
        }
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("bulk_actions", &self.bulk_actions)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DataTable`].
pub struct DataTableBuilder<T> {
    columns: Vec<ColumnDef<T>>,
    config: TableConfig,
    rows: Vec<T>,
    fetcher: Option<Arc<dyn PageFetcher<T>>>,
    quick_filters: Vec<QuickFilter<T>>,
    bulk_actions: Vec<BulkAction<T>>,
    confirmer: Option<Arc<dyn Confirmer>>,
    store: Option<Arc<dyn crate::store::ConfigStore>>,
    default_columns: Option<ColumnConfig>,
    row_id: Option<RowIdFn<T>>,
    on_selection_change: Option<SelectionCallback<T>>,
    mobile_card: Option<MobileCardFn<T>>,
}

impl<T: Clone + Send + Sync + 'static> DataTableBuilder<T> {
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial rows for client-side pagination.
    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.rows = rows;
        self
    }

    /// Switch to server-side pagination.
    pub fn with_fetcher(mut self, fetcher: impl PageFetcher<T> + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    pub fn with_quick_filter(mut self, filter: QuickFilter<T>) -> Self {
        self.quick_filters.push(filter);
        self
    }

    pub fn with_bulk_action(mut self, action: BulkAction<T>) -> Self {
        self.bulk_actions.push(action);
        self
    }

    pub fn with_confirmer(mut self, confirmer: impl Confirmer + 'static) -> Self {
        self.confirmer = Some(Arc::new(confirmer));
        self
    }

    /// Persist column configuration in `store` under the config's
    /// `storage_key`.
    pub fn with_store(mut self, store: Arc<dyn crate::store::ConfigStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Default column configuration, also the target of `reset_columns`.
    pub fn with_default_columns(mut self, config: ColumnConfig) -> Self {
        self.default_columns = Some(config);
        self
    }

    pub fn with_row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, usize) -> String + Send + Sync + 'static,
    {
        self.row_id = Some(Arc::new(f));
        self
    }

    pub fn on_selection_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&[T]) + Send + Sync + 'static,
    {
        self.on_selection_change = Some(Arc::new(f));
        self
    }

    pub fn with_mobile_card<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> MobileCard + Send + Sync + 'static,
    {
        self.mobile_card = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> DataTable<T> {
        let mut config = self.config;
        config.default_page_size = config.default_page_size.max(1);

        let pagination = match self.fetcher {
            Some(fetcher) => Pagination::server(
                config.initial_page_index,
                config.default_page_size,
                fetcher,
                config.fetch_on_mount,
            ),
            None => Pagination::client(config.initial_page_index, config.default_page_size),
        };

        let column_flags = self
            .columns
            .iter()
            .map(|c| (c.id.clone(), c.can_hide))
            .collect();
        let defaults = self
            .default_columns
            .unwrap_or_else(|| ColumnConfig::for_columns(self.columns.iter().map(|c| c.id.clone())));
        let columns = ColumnConfigManager::new(
            column_flags,
            defaults,
            self.store,
            config.storage_key.clone(),
        );

        DataTable {
            columns: Arc::new(self.columns),
            config: Arc::new(config),
            inner: Arc::new(RwLock::new(TableInner {
                rows: self.rows,
                quick_filters: QuickFilterSet::new(self.quick_filters),
                column_filters: BTreeMap::new(),
                global_filter: String::new(),
                sort: None,
                selection: Selection::new(),
                columns,
            })),
            pagination,
            bulk_actions: Arc::new(self.bulk_actions),
            confirmer: self.confirmer,
            row_id: self.row_id,
            on_selection_change: self.on_selection_change,
            mobile_card: self.mobile_card,
        }
    }
}

impl<T: Clone + Send + Sync + 'static> DataTable<T> {
    /// Start building a table over `columns`.
    pub fn builder(columns: Vec<ColumnDef<T>>) -> DataTableBuilder<T> {
        DataTableBuilder {
            columns,
            config: TableConfig::default(),
            rows: Vec::new(),
            fetcher: None,
            quick_filters: Vec::new(),
            bulk_actions: Vec::new(),
            confirmer: None,
            store: None,
            default_columns: None,
            row_id: None,
            on_selection_change: None,
            mobile_card: None,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDef<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn mode(&self) -> PaginationMode {
        self.pagination.mode()
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the client-mode rows. Returns to the first page.
    ///
    /// Without a row id function, ids are source positions and name different
    /// rows in the new data, so the selection is cleared.
    pub fn set_data(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
        }
        if self.row_id.is_none() {
            self.clear_selection();
        }
        self.after_filter_change();
    }

    /// Rows on the current page, after filtering and sorting.
    pub fn rows(&self) -> Vec<T> {
        self.row_model().page.into_iter().map(|(_, row)| row).collect()
    }

    /// Ids of the rows on the current page.
    pub fn row_ids(&self) -> Vec<String> {
        self.row_model().page.into_iter().map(|(id, _)| id).collect()
    }

    pub fn pagination_state(&self) -> PaginationState {
        self.row_model().pagination
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.pagination.error()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Fire the mount-time fetch (server mode, once).
    pub async fn mount(&self) -> bool {
        let fetched = self.pagination.mount().await;
        if fetched {
            self.after_page_change();
        }
        fetched
    }

    /// Go to page `index`.
    ///
    /// In server mode the index is committed before the fetch, so after a
    /// failed fetch the footer reports the requested page while the body
    /// still shows the last good one. `refresh` retries it.
    pub async fn set_page_index(&self, index: usize) {
        self.pagination.set_page_index(index).await;
        self.after_page_change();
    }

    pub async fn set_page_size(&self, size: usize) {
        self.pagination.set_page_size(size).await;
        self.after_page_change();
    }

    pub async fn refresh(&self) {
        self.pagination.refresh().await;
        self.after_page_change();
    }

    /// Server pages reuse the default positional ids, so without a row id
    /// function a new page never inherits the previous selection.
    fn after_page_change(&self) {
        if self.mode() == PaginationMode::Server && self.row_id.is_none() {
            self.clear_selection();
        }
        self.reconcile_selection();
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination_state().can_next()
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination_state().can_previous()
    }

    /// Go to the next page if there is one. Returns `false` otherwise.
    pub async fn next_page(&self) -> bool {
        let state = self.pagination_state();
        if !state.can_next() {
            return false;
        }
        self.set_page_index(state.page_index + 1).await;
        true
    }

    /// Go to the previous page if there is one. Returns `false` otherwise.
    pub async fn previous_page(&self) -> bool {
        let state = self.pagination_state();
        if !state.can_previous() {
            return false;
        }
        self.set_page_index(state.page_index - 1).await;
        true
    }

    pub async fn first_page(&self) {
        self.set_page_index(0).await;
    }

    pub async fn last_page(&self) {
        let state = self.pagination_state();
        self.set_page_index(state.page_count.saturating_sub(1)).await;
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    pub fn global_filter(&self) -> String {
        self.inner
            .read()
            .map(|g| g.global_filter.clone())
            .unwrap_or_default()
    }

    pub fn set_global_filter(&self, query: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.global_filter = query.into();
        }
        self.after_filter_change();
    }

    /// Filter one column. Returns `false` for unknown or non-filterable
    /// columns.
    pub fn set_column_filter(&self, column_id: &str, filter: ColumnFilter) -> bool {
        if !self.column(column_id).is_some_and(|c| c.can_filter) {
            return false;
        }
        if let Ok(mut guard) = self.inner.write() {
            if filter.is_noop() {
                guard.column_filters.remove(column_id);
            } else {
                guard.column_filters.insert(column_id.to_string(), filter);
            }
        }
        self.after_filter_change();
        true
    }

    pub fn clear_column_filter(&self, column_id: &str) {
        let removed = self
            .inner
            .write()
            .map(|mut g| g.column_filters.remove(column_id).is_some())
            .unwrap_or(false);
        if removed {
            self.after_filter_change();
        }
    }

    pub fn column_filters(&self) -> BTreeMap<String, ColumnFilter> {
        self.inner
            .read()
            .map(|g| g.column_filters.clone())
            .unwrap_or_default()
    }

    /// Flip a quick filter. Returns `false` for unknown labels.
    pub fn toggle_quick_filter(&self, label: &str) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut g| g.quick_filters.toggle(label))
            .unwrap_or(false);
        if changed {
            self.after_filter_change();
        }
        changed
    }

    /// Switch a quick filter on or off. Returns `true` if it changed.
    pub fn set_quick_filter(&self, label: &str, active: bool) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut g| g.quick_filters.set(label, active))
            .unwrap_or(false);
        if changed {
            self.after_filter_change();
        }
        changed
    }

    pub fn active_quick_filters(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.quick_filters.active_labels())
            .unwrap_or_default()
    }

    /// Clear the global and column filters and restore quick-filter defaults.
    pub fn clear_filters(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.global_filter.clear();
            guard.column_filters.clear();
            guard.quick_filters.reset();
        }
        self.after_filter_change();
    }

    fn after_filter_change(&self) {
        if self.mode() == PaginationMode::Client {
            self.pagination.reset_page_index();
        }
        self.reconcile_selection();
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> Option<SortState> {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Advance a column's sort: ascending, descending, unsorted.
    /// Non-sortable and unknown columns are ignored.
    pub fn toggle_sort(&self, column_id: &str) -> Option<SortState> {
        if !self.column(column_id).is_some_and(|c| c.can_sort) {
            return self.sort();
        }
        let sort = self.inner.write().ok().and_then(|mut g| {
            g.sort = next_sort(g.sort.as_ref(), column_id);
            g.sort.clone()
        });
        self.reconcile_selection();
        sort
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn is_selected(&self, id: &str) -> bool {
        self.inner
            .read()
            .map(|g| g.selection.is_selected(id))
            .unwrap_or(false)
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.selection.selected())
            .unwrap_or_default()
    }

    /// Selected rows in page order.
    pub fn selected_rows(&self) -> Vec<T> {
        let page = self.row_model().page;
        let Ok(guard) = self.inner.read() else {
            return Vec::new();
        };
        page.into_iter()
            .filter(|(id, _)| guard.selection.is_selected(id))
            .map(|(_, row)| row)
            .collect()
    }

    /// Toggle one row. Ids not on the current page are ignored.
    /// Returns `true` if the row is now selected.
    pub fn toggle_row(&self, id: &str) -> bool {
        if !self.row_ids().iter().any(|row_id| row_id == id) {
            return false;
        }
        let selected = self
            .inner
            .write()
            .map(|mut g| g.selection.toggle(id))
            .unwrap_or(false);
        self.notify_selection();
        selected
    }

    /// Select or deselect every row on the current page.
    pub fn toggle_all_on_page(&self, selected: bool) {
        let ids = self.row_ids();
        let changed = self
            .inner
            .write()
            .map(|mut g| g.selection.set_many(&ids, selected))
            .unwrap_or(false);
        if changed {
            self.notify_selection();
        }
    }

    pub fn clear_selection(&self) {
        let removed = self
            .inner
            .write()
            .map(|mut g| g.selection.clear())
            .unwrap_or_default();
        if !removed.is_empty() {
            self.notify_selection();
        }
    }

    /// Drop selected ids that are no longer on the current page.
    fn reconcile_selection(&self) {
        let page_ids = self.row_ids();
        let visible: HashSet<&str> = page_ids.iter().map(String::as_str).collect();
        let removed = self
            .inner
            .write()
            .map(|mut g| g.selection.retain(&visible))
            .unwrap_or_default();
        if !removed.is_empty() {
            log::debug!("Pruned {} selected rows that left the page", removed.len());
            self.notify_selection();
        }
    }

    fn notify_selection(&self) {
        if let Some(callback) = &self.on_selection_change {
            let rows = self.selected_rows();
            callback(&rows);
        }
    }

    // -------------------------------------------------------------------------
    // Column configuration
    // -------------------------------------------------------------------------

    pub fn column_config(&self) -> ColumnConfig {
        self.inner
            .read()
            .map(|g| g.columns.config().clone())
            .unwrap_or_default()
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> Vec<ColumnDef<T>> {
        let order = self
            .inner
            .read()
            .map(|g| g.columns.display_order())
            .unwrap_or_default();
        order
            .iter()
            .filter_map(|id| self.column(id).cloned())
            .collect()
    }

    pub fn toggle_column(&self, id: &str) -> bool {
        self.update_columns(|columns| columns.toggle(id))
    }

    pub fn set_column_visibility(&self, id: &str, visible: bool) -> bool {
        self.update_columns(|columns| columns.set_visibility(id, visible))
    }

    pub fn show_all_columns(&self) {
        self.update_columns(|columns| {
            columns.show_all();
            true
        });
    }

    pub fn hide_all_columns(&self) {
        self.update_columns(|columns| {
            columns.hide_all();
            true
        });
    }

    pub fn reorder_columns(&self, from: usize, to: usize) -> bool {
        self.update_columns(|columns| columns.reorder(from, to))
    }

    pub fn pin_column(&self, id: &str, side: Option<PinSide>) -> bool {
        self.update_columns(|columns| columns.pin(id, side))
    }

    /// Restore the default column configuration.
    pub fn reset_columns(&self) {
        self.update_columns(|columns| {
            columns.reset();
            true
        });
    }

    fn update_columns(&self, f: impl FnOnce(&mut ColumnConfigManager) -> bool) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut g| f(&mut g.columns))
            .unwrap_or(false);
        if !changed {
            return false;
        }
        // Global search only looks at visible columns, so a visibility change
        // can change the filtered row set.
        let searching = self.config.searchable_columns.is_empty()
            && !self.global_filter().trim().is_empty();
        if searching {
            self.after_filter_change();
        } else {
            self.reconcile_selection();
        }
        true
    }
}

impl<T: Clone + Send + Sync + Serialize + 'static> DataTable<T> {
    /// Export the selected rows, or every row matching the current filters
    /// when nothing is selected.
    ///
    /// In client mode "every row" means the whole filtered dataset, not only
    /// the visible page. In server mode only the current page is available.
    pub fn export_csv(&self) -> Result<CsvExport, ExportError> {
        let mut rows = self.selected_rows();
        if rows.is_empty() {
            rows = self.row_model().rows.into_iter().map(|(_, row)| row).collect();
        }
        log::debug!("Exporting {} rows", rows.len());
        export_rows(&rows, &self.config.export_columns, &self.config.export_filename)
    }
}
