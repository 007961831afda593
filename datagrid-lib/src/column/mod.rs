//! Column definitions and cell values.
//!
//! A [`ColumnDef`] is immutable once handed to a table. Visibility, order and
//! pinning live in a separate [`ColumnConfig`] overlay so that the same
//! definitions can be shown differently per user.

mod config;

pub use config::{ColumnConfig, ColumnConfigManager, PinSide};

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A value produced by a column for one row.
///
/// Used for display, filtering, searching and the default sort comparator.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total order: `Null < Bool < Number < Text`.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// Derives a cell value from a row.
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Column header: either a fixed label or one computed at render time.
#[derive(Clone)]
pub enum Header {
    Literal(String),
    Computed(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Header {
    /// Resolve the header to its label.
    pub fn label(&self) -> String {
        match self {
            Self::Literal(s) => s.clone(),
            Self::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Header {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Header {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// Column definition.
///
/// # Examples
///
/// ```
/// use datagrid_lib::column::ColumnDef;
///
/// struct Contact { name: String, email: String }
///
/// let columns = vec![
///     ColumnDef::new("name", "Name", |c: &Contact| c.name.clone().into()),
///     ColumnDef::new("email", "Email", |c: &Contact| c.email.clone().into()).no_sort(),
/// ];
/// ```
pub struct ColumnDef<T> {
    /// Stable identifier, used by filters, sort and column configuration.
    pub id: String,
    pub header: Header,
    pub cell: CellRenderer<T>,
    pub can_sort: bool,
    pub can_hide: bool,
    pub can_filter: bool,
}

impl<T> ColumnDef<T> {
    /// Create a column. Columns sort, hide and filter by default.
    pub fn new<F>(id: impl Into<String>, header: impl Into<Header>, cell: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            cell: Arc::new(cell),
            can_sort: true,
            can_hide: true,
            can_filter: true,
        }
    }

    /// Disable sorting on this column.
    pub fn no_sort(mut self) -> Self {
        self.can_sort = false;
        self
    }

    /// Keep this column visible no matter what.
    pub fn no_hide(mut self) -> Self {
        self.can_hide = false;
        self
    }

    /// Exclude this column from per-column filtering.
    pub fn no_filter(mut self) -> Self {
        self.can_filter = false;
        self
    }

    /// Evaluate the cell for a row.
    pub fn value(&self, row: &T) -> CellValue {
        (self.cell)(row)
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            cell: Arc::clone(&self.cell),
            can_sort: self.can_sort,
            can_hide: self.can_hide,
            can_filter: self.can_filter,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("can_sort", &self.can_sort)
            .field("can_hide", &self.can_hide)
            .field("can_filter", &self.can_filter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_ordering() {
        let mut values = vec![
            CellValue::from("b"),
            CellValue::Number(2.0),
            CellValue::Null,
            CellValue::from("a"),
            CellValue::Bool(true),
            CellValue::Number(-1.5),
        ];
        values.sort_by(|a, b| a.compare(b));

        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Bool(true),
                CellValue::Number(-1.5),
                CellValue::Number(2.0),
                CellValue::from("a"),
                CellValue::from("b"),
            ]
        );
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::from(Some("x")).to_string(), "x");
        assert_eq!(CellValue::from(None::<&str>), CellValue::Null);
    }

    #[test]
    fn test_computed_header() {
        let header = Header::Computed(Arc::new(|| "Total (EUR)".to_string()));
        assert_eq!(header.label(), "Total (EUR)");
    }
}
