//! Row model computation: quick filters, column filters, global search,
//! sort, then pagination.

use crate::filter::matches_global;
use crate::pagination::{PaginationMode, PaginationState};
use crate::sort::sort_rows;

use super::{DataTable, TableInner};

/// The processed rows of a table at one point in time.
#[derive(Debug, Clone)]
pub struct RowModel<T> {
    /// Every row passing all filters, sorted, as `(id, row)`.
    pub rows: Vec<(String, T)>,
    /// The rows of the current page.
    pub page: Vec<(String, T)>,
    pub pagination: PaginationState,
}

impl<T: Clone + Send + Sync + 'static> DataTable<T> {
    /// Compute the current row model.
    ///
    /// In server mode the source is the current server page and nothing is
    /// sliced; quick filters then only narrow that page, and the footer
    /// keeps reporting the server's totals.
    pub fn row_model(&self) -> RowModel<T> {
        let mode = self.pagination.mode();
        let Ok(guard) = self.inner.read() else {
            return RowModel {
                rows: Vec::new(),
                page: Vec::new(),
                pagination: PaginationState::default(),
            };
        };

        let source = match mode {
            PaginationMode::Client => guard.rows.clone(),
            PaginationMode::Server => self.pagination.server_rows(),
        };

        let mut rows: Vec<(String, T)> = source
            .into_iter()
            .enumerate()
            .map(|(index, row)| (self.row_id_of(&row, index), row))
            .filter(|(_, row)| guard.quick_filters.matches(row))
            .filter(|(_, row)| self.matches_column_filters(&guard, row))
            .collect();

        if !guard.global_filter.trim().is_empty() {
            let searchable = self.searchable_columns(&guard);
            rows.retain(|(_, row)| matches_global(row, &searchable, &guard.global_filter));
        }

        if let Some(sort) = &guard.sort
            && let Some(column) = self.column(&sort.column_id)
            && column.can_sort
        {
            sort_rows(&mut rows, column, sort.direction);
        }

        let pagination = self.pagination.state(rows.len());
        let page = match mode {
            PaginationMode::Client => rows
                .iter()
                .skip(pagination.page_index.saturating_mul(pagination.page_size))
                .take(pagination.page_size)
                .cloned()
                .collect(),
            PaginationMode::Server => rows.clone(),
        };

        RowModel {
            rows,
            page,
            pagination,
        }
    }

    fn row_id_of(&self, row: &T, index: usize) -> String {
        match &self.row_id {
            Some(f) => f(row, index),
            None => index.to_string(),
        }
    }

    fn matches_column_filters(&self, inner: &TableInner<T>, row: &T) -> bool {
        inner.column_filters.iter().all(|(id, filter)| {
            self.column(id)
                .is_none_or(|column| filter.matches(&column.value(row)))
        })
    }

    /// Columns the global filter searches: the configured subset, or every
    /// visible column.
    fn searchable_columns(&self, inner: &TableInner<T>) -> Vec<&crate::column::ColumnDef<T>> {
        if self.config.searchable_columns.is_empty() {
            inner
                .columns
                .display_order()
                .iter()
                .filter_map(|id| self.column(id))
                .collect()
        } else {
            self.config
                .searchable_columns
                .iter()
                .filter_map(|id| self.column(id))
                .collect()
        }
    }
}
