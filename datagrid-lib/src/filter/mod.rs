//! Row filtering.
//!
//! Three layers, ANDed in a fixed order:
//!
//! 1. quick filters: named predicates over a whole row, applied first and
//!    always client side,
//! 2. column filters: one value test per column,
//! 3. the global filter: free-text search across columns.

mod column;
mod global;

pub use column::{ColumnFilter, FilterOp};
pub use global::matches_global;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Row predicate used by quick filters.
pub type RowPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A named, toggleable predicate over a full row.
pub struct QuickFilter<T> {
    pub label: String,
    pub predicate: RowPredicate<T>,
    pub default_active: bool,
}

impl<T> QuickFilter<T> {
    /// Create an inactive quick filter.
    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
            default_active: false,
        }
    }

    /// Start with this filter switched on.
    pub fn active(mut self) -> Self {
        self.default_active = true;
        self
    }
}

impl<T> Clone for QuickFilter<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
            default_active: self.default_active,
        }
    }
}

impl<T> fmt::Debug for QuickFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickFilter")
            .field("label", &self.label)
            .field("default_active", &self.default_active)
            .finish_non_exhaustive()
    }
}

/// The quick filters of a table and which of them are switched on.
pub struct QuickFilterSet<T> {
    filters: Vec<QuickFilter<T>>,
    active: BTreeSet<String>,
}

impl<T> QuickFilterSet<T> {
    pub fn new(filters: Vec<QuickFilter<T>>) -> Self {
        let active = default_active(&filters);
        Self { filters, active }
    }

    pub fn filters(&self) -> &[QuickFilter<T>] {
        &self.filters
    }

    pub fn is_active(&self, label: &str) -> bool {
        self.active.contains(label)
    }

    /// Labels of the active filters, in definition order.
    pub fn active_labels(&self) -> Vec<String> {
        self.filters
            .iter()
            .filter(|f| self.active.contains(&f.label))
            .map(|f| f.label.clone())
            .collect()
    }

    /// Switch a filter on or off. Returns `false` for unknown labels or
    /// when nothing changed.
    pub fn set(&mut self, label: &str, active: bool) -> bool {
        if !self.filters.iter().any(|f| f.label == label) {
            return false;
        }
        if active {
            self.active.insert(label.to_string())
        } else {
            self.active.remove(label)
        }
    }

    /// Flip a filter. Returns `false` for unknown labels.
    pub fn toggle(&mut self, label: &str) -> bool {
        let active = self.is_active(label);
        self.set(label, !active)
    }

    /// Back to each filter's `default_active`. Returns `true` if anything changed.
    pub fn reset(&mut self) -> bool {
        let defaults = default_active(&self.filters);
        let changed = defaults != self.active;
        self.active = defaults;
        changed
    }

    /// `true` if the row passes every active filter.
    pub fn matches(&self, row: &T) -> bool {
        self.filters
            .iter()
            .filter(|f| self.active.contains(&f.label))
            .all(|f| (f.predicate)(row))
    }
}

fn default_active<T>(filters: &[QuickFilter<T>]) -> BTreeSet<String> {
    filters
        .iter()
        .filter(|f| f.default_active)
        .map(|f| f.label.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> QuickFilterSet<u32> {
        QuickFilterSet::new(vec![
            QuickFilter::new("even", |n: &u32| n % 2 == 0),
            QuickFilter::new("small", |n: &u32| *n < 5).active(),
        ])
    }

    #[test]
    fn test_default_active() {
        let filters = set();
        assert_eq!(filters.active_labels(), vec!["small"]);
        assert!(filters.matches(&3));
        assert!(!filters.matches(&7));
    }

    #[test]
    fn test_active_filters_are_anded() {
        let mut filters = set();
        assert!(filters.toggle("even"));
        let kept: Vec<u32> = (0..10).filter(|n| filters.matches(n)).collect();
        assert_eq!(kept, vec![0, 2, 4]);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut filters = set();
        let before: Vec<u32> = (0..10).filter(|n| filters.matches(n)).collect();
        filters.toggle("even");
        filters.toggle("even");
        let after: Vec<u32> = (0..10).filter(|n| filters.matches(n)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unknown_label_is_ignored() {
        let mut filters = set();
        assert!(!filters.toggle("missing"));
        assert_eq!(filters.active_labels(), vec!["small"]);
    }

    #[test]
    fn test_reset() {
        let mut filters = set();
        filters.set("small", false);
        filters.set("even", true);
        assert!(filters.reset());
        assert_eq!(filters.active_labels(), vec!["small"]);
        assert!(!filters.reset());
    }
}
