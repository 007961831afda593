//! Per-column filters.

use crate::column::CellValue;

/// How a column filter compares the cell against its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterOp {
    /// Case-insensitive substring match.
    #[default]
    Contains,
    /// Exact match on the displayed value.
    Equals,
}

/// A filter scoped to one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub op: FilterOp,
    pub value: String,
}

impl ColumnFilter {
    pub fn contains(value: impl Into<String>) -> Self {
        Self {
            op: FilterOp::Contains,
            value: value.into(),
        }
    }

    pub fn equals(value: impl Into<String>) -> Self {
        Self {
            op: FilterOp::Equals,
            value: value.into(),
        }
    }

    /// An empty `Contains` filter matches everything.
    pub fn is_noop(&self) -> bool {
        self.op == FilterOp::Contains && self.value.is_empty()
    }

    pub fn matches(&self, cell: &CellValue) -> bool {
        let text = cell.to_string();
        match self.op {
            FilterOp::Contains => text.to_lowercase().contains(&self.value.to_lowercase()),
            FilterOp::Equals => text == self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_case_insensitive() {
        let filter = ColumnFilter::contains("ACME");
        assert!(filter.matches(&"Acme Corp".into()));
        assert!(!filter.matches(&"Globex".into()));
        assert!(!filter.matches(&CellValue::Null));
    }

    #[test]
    fn test_equals_is_exact() {
        let filter = ColumnFilter::equals("active");
        assert!(filter.matches(&"active".into()));
        assert!(!filter.matches(&"Active".into()));
        assert!(!filter.matches(&"inactive".into()));
        assert!(ColumnFilter::equals("3").matches(&CellValue::Number(3.0)));
    }
}
