//! Plain-data view model of a table.

use crate::action::ActionVariant;
use crate::column::PinSide;
use crate::filter::ColumnFilter;
use crate::pagination::PaginationState;
use crate::selection::CheckState;
use crate::sort::SortDirection;

use super::DataTable;

/// Card shown instead of a table row on narrow viewports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileCard {
    pub title: String,
    /// `(label, value)` pairs.
    pub fields: Vec<(String, String)>,
}

impl MobileCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((label.into(), value.into()));
        self
    }
}

/// Everything needed to draw the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub toolbar: Toolbar,
    pub header: HeaderRow,
    /// Fetch error banner. Shown above the body, never instead of it.
    pub error: Option<String>,
    pub layout: BodyLayout,
    pub body: TableBody,
    pub footer: Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toolbar {
    pub search: String,
    pub quick_filters: Vec<QuickFilterChip>,
    pub filter_panel: Vec<FilterField>,
    pub can_export: bool,
    /// Present only while rows are selected.
    pub bulk_bar: Option<BulkBar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFilterChip {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub column_id: String,
    pub label: String,
    pub filter: Option<ColumnFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkBar {
    pub selected_count: usize,
    pub actions: Vec<BulkButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkButton {
    pub label: String,
    pub variant: ActionVariant,
    pub disabled: bool,
    pub needs_confirm: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    pub select_all: CheckState,
    pub cells: Vec<HeaderCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub column_id: String,
    pub label: String,
    pub can_sort: bool,
    pub sort: Option<SortDirection>,
    pub pinned: Option<PinSide>,
    pub can_hide: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLayout {
    Grid,
    Cards,
}

/// Body state, in priority order: loading, empty, rows.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// A single placeholder row spanning `colspan` columns.
    Loading { colspan: usize },
    /// No rows after filtering.
    Empty { colspan: usize },
    Rows(Vec<ViewRow>),
    Cards(Vec<ViewCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub id: String,
    pub selected: bool,
    /// Display strings, one per header cell.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCard {
    pub id: String,
    pub selected: bool,
    pub card: MobileCard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub pagination: PaginationState,
    pub can_previous: bool,
    pub can_next: bool,
    pub page_size_options: Vec<usize>,
}

impl<T: Clone + Send + Sync + 'static> DataTable<T> {
    /// Build the view model for a viewport `viewport_width` pixels wide.
    pub fn view(&self, viewport_width: u32) -> TableView {
        let model = self.row_model();
        let columns = self.visible_columns();
        let selected_rows = self.selected_rows();
        let page_ids: Vec<String> = model.page.iter().map(|(id, _)| id.clone()).collect();

        let (search, chips, filters, sort, select_all, selected) = match self.inner.read() {
            Ok(guard) => (
                guard.global_filter.clone(),
                guard
                    .quick_filters
                    .filters()
                    .iter()
                    .map(|f| QuickFilterChip {
                        label: f.label.clone(),
                        active: guard.quick_filters.is_active(&f.label),
                    })
                    .collect::<Vec<_>>(),
                guard.column_filters.clone(),
                guard.sort.clone(),
                guard.selection.check_state(&page_ids),
                guard.selection.clone(),
            ),
            Err(_) => Default::default(),
        };
        let pinned = self.column_config().pinned;

        let header = HeaderRow {
            select_all,
            cells: columns
                .iter()
                .map(|c| HeaderCell {
                    column_id: c.id.clone(),
                    label: c.header.label(),
                    can_sort: c.can_sort,
                    sort: sort
                        .as_ref()
                        .filter(|s| s.column_id == c.id)
                        .map(|s| s.direction),
                    pinned: pinned.get(&c.id).copied(),
                    can_hide: c.can_hide,
                })
                .collect(),
        };

        let bulk_bar = (!selected_rows.is_empty()).then(|| BulkBar {
            selected_count: selected_rows.len(),
            actions: self
                .bulk_actions
                .iter()
                .map(|a| BulkButton {
                    label: a.label.clone(),
                    variant: a.variant,
                    disabled: a.is_disabled(&selected_rows),
                    needs_confirm: a.confirm.is_some(),
                })
                .collect(),
        });

        let toolbar = Toolbar {
            search,
            quick_filters: chips,
            filter_panel: columns
                .iter()
                .filter(|c| c.can_filter)
                .map(|c| FilterField {
                    column_id: c.id.clone(),
                    label: c.header.label(),
                    filter: filters.get(&c.id).cloned(),
                })
                .collect(),
            can_export: !model.rows.is_empty(),
            bulk_bar,
        };

        let layout = match &self.mobile_card {
            Some(_) if viewport_width < self.config.mobile_breakpoint => BodyLayout::Cards,
            _ => BodyLayout::Grid,
        };

        // +1 for the selection checkbox column.
        let colspan = columns.len() + 1;
        let body = if self.is_loading() {
            TableBody::Loading { colspan }
        } else if model.page.is_empty() {
            TableBody::Empty { colspan }
        } else {
            match (&self.mobile_card, layout) {
                (Some(card), BodyLayout::Cards) => TableBody::Cards(
                    model
                        .page
                        .iter()
                        .map(|(id, row)| ViewCard {
                            id: id.clone(),
                            selected: selected.is_selected(id),
                            card: card(row),
                        })
                        .collect(),
                ),
                _ => TableBody::Rows(
                    model
                        .page
                        .iter()
                        .map(|(id, row)| ViewRow {
                            id: id.clone(),
                            selected: selected.is_selected(id),
                            cells: columns.iter().map(|c| c.value(row).to_string()).collect(),
                        })
                        .collect(),
                ),
            }
        };

        TableView {
            toolbar,
            header,
            error: self.error(),
            layout,
            body,
            footer: Footer {
                pagination: model.pagination,
                can_previous: model.pagination.can_previous(),
                can_next: model.pagination.can_next(),
                page_size_options: self.config.page_size_options.clone(),
            },
        }
    }
}
