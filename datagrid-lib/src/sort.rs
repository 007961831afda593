//! Column sort state.

use crate::column::ColumnDef;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The column the table is sorted by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Next state when a header is clicked: unsorted, ascending, descending,
/// then back to unsorted. Clicking another column starts it ascending.
pub fn next_sort(current: Option<&SortState>, column_id: &str) -> Option<SortState> {
    let direction = match current {
        Some(state) if state.column_id == column_id => match state.direction {
            SortDirection::Ascending => Some(SortDirection::Descending),
            SortDirection::Descending => None,
        },
        _ => Some(SortDirection::Ascending),
    };
    direction.map(|direction| SortState {
        column_id: column_id.to_string(),
        direction,
    })
}

/// Stable-sort `rows` by the column's cell values.
pub fn sort_rows<T>(rows: &mut [(String, T)], column: &ColumnDef<T>, direction: SortDirection) {
    rows.sort_by(|(_, a), (_, b)| {
        let ordering = column.value(a).compare(&column.value(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
