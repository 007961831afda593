//! Row selection state.
//!
//! Selection is keyed by row id strings so it stays attached to the same
//! rows when the table re-sorts. It is pruned to the rows currently on the
//! page whenever the row model changes; see [`Selection::retain`].

use std::collections::HashSet;

/// Tri-state of the header's "select all on page" checkbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Unchecked,
    Indeterminate,
    Checked,
}

/// ID-based selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    /// Toggle selection of an ID.
    /// Returns `true` if the ID is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select or deselect every ID in `ids`.
    /// Returns `true` if anything changed.
    pub fn set_many(&mut self, ids: &[String], selected: bool) -> bool {
        let mut changed = false;
        for id in ids {
            changed |= if selected {
                self.selected.insert(id.clone())
            } else {
                self.selected.remove(id)
            };
        }
        changed
    }

    /// Drop every ID not in `visible`.
    /// Returns the IDs that were removed.
    pub fn retain(&mut self, visible: &HashSet<&str>) -> Vec<String> {
        let removed: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !visible.contains(id.as_str()))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        removed
    }

    /// Header checkbox state for the given page of IDs.
    pub fn check_state(&self, page_ids: &[String]) -> CheckState {
        let count = page_ids.iter().filter(|id| self.is_selected(id)).count();
        if count == 0 {
            CheckState::Unchecked
        } else if count == page_ids.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }
}
