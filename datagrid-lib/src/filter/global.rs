//! Global free-text search.

use crate::column::ColumnDef;

/// `true` if any of `columns` renders a value containing `query`,
/// ignoring case. A blank query matches every row.
pub fn matches_global<T>(row: &T, columns: &[&ColumnDef<T>], query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    columns
        .iter()
        .any(|column| column.value(row).to_string().to_lowercase().contains(&query))
}
