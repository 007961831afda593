//! Column visibility, order and pinning overlay.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::ConfigStore;

/// Side a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
}

/// Persistable column overlay.
///
/// Missing visibility entries mean "visible"; missing pin entries mean
/// "not pinned". Ids in `order` that no longer name a column are ignored
/// and columns missing from `order` are appended in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub visibility: BTreeMap<String, bool>,
    pub order: Vec<String>,
    pub pinned: BTreeMap<String, PinSide>,
}

impl ColumnConfig {
    /// Default configuration for a set of column ids: all visible, in the
    /// given order, nothing pinned.
    pub fn for_columns<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            visibility: BTreeMap::new(),
            order: ids.into_iter().map(Into::into).collect(),
            pinned: BTreeMap::new(),
        }
    }

    /// Hide a column in this configuration.
    pub fn hidden(mut self, id: impl Into<String>) -> Self {
        self.visibility.insert(id.into(), false);
        self
    }

    /// Pin a column in this configuration.
    pub fn pinned(mut self, id: impl Into<String>, side: PinSide) -> Self {
        self.pinned.insert(id.into(), side);
        self
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.get(id).copied().unwrap_or(true)
    }

    pub fn pin_side(&self, id: &str) -> Option<PinSide> {
        self.pinned.get(id).copied()
    }
}

/// Owns the live [`ColumnConfig`] and writes it through to a store.
///
/// Every mutation persists immediately. Store failures are logged and
/// swallowed so that a broken store never blocks a UI change.
pub struct ColumnConfigManager {
    /// Known column ids, in definition order, with their `can_hide` flag.
    columns: Vec<(String, bool)>,
    defaults: ColumnConfig,
    current: ColumnConfig,
    store: Option<Arc<dyn ConfigStore>>,
    key: Option<String>,
}

impl ColumnConfigManager {
    /// Create a manager and hydrate it from the store.
    ///
    /// `columns` lists every column id with its `can_hide` flag.
    pub fn new(
        columns: Vec<(String, bool)>,
        defaults: ColumnConfig,
        store: Option<Arc<dyn ConfigStore>>,
        key: Option<String>,
    ) -> Self {
        let defaults = normalize(defaults, &columns);
        let mut manager = Self {
            current: defaults.clone(),
            columns,
            defaults,
            store,
            key,
        };
        if let Some(loaded) = manager.load() {
            manager.current = normalize(loaded, &manager.columns);
        }
        manager
    }

    fn load(&self) -> Option<ColumnConfig> {
        let (store, key) = (self.store.as_ref()?, self.key.as_ref()?);
        match store.get(key) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(config) => {
                    log::debug!("Hydrated column config '{}'", key);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Ignoring malformed column config '{}': {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read column config '{}': {}", key, e);
                None
            }
        }
    }

    fn persist(&self) {
        let (Some(store), Some(key)) = (self.store.as_ref(), self.key.as_ref()) else {
            return;
        };
        let value = match serde_json::to_value(&self.current) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to serialize column config '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = store.set(key, value) {
            log::warn!("Failed to persist column config '{}': {}", key, e);
        }
    }

    fn can_hide(&self, id: &str) -> Option<bool> {
        self.columns
            .iter()
            .find(|(col, _)| col == id)
            .map(|(_, can_hide)| *can_hide)
    }

    /// The live configuration.
    pub fn config(&self) -> &ColumnConfig {
        &self.current
    }

    /// The caller-supplied default configuration.
    pub fn defaults(&self) -> &ColumnConfig {
        &self.defaults
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.current.is_visible(id)
    }

    /// Flip a column's visibility. Returns `false` if the column is unknown or
    /// cannot be hidden.
    pub fn toggle(&mut self, id: &str) -> bool {
        let visible = self.current.is_visible(id);
        self.set_visibility(id, !visible)
    }

    /// Set a column's visibility. Returns `false` if the column is unknown or
    /// the change would hide a column that cannot be hidden.
    pub fn set_visibility(&mut self, id: &str, visible: bool) -> bool {
        match self.can_hide(id) {
            None => return false,
            Some(false) if !visible => return false,
            _ => {}
        }
        self.current.visibility.insert(id.to_string(), visible);
        self.persist();
        true
    }

    pub fn show_all(&mut self) {
        for (id, _) in &self.columns {
            self.current.visibility.insert(id.clone(), true);
        }
        self.persist();
    }

    /// Hide every column that can be hidden.
    pub fn hide_all(&mut self) {
        for (id, can_hide) in &self.columns {
            if *can_hide {
                self.current.visibility.insert(id.clone(), false);
            }
        }
        self.persist();
    }

    /// Move the column at `from` to `to` within the order list.
    ///
    /// Returns `false` (and changes nothing) if either index is out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.current.order.len();
        if from >= len || to >= len {
            return false;
        }
        let id = self.current.order.remove(from);
        self.current.order.insert(to, id);
        self.persist();
        true
    }

    /// Pin a column to a side, or unpin it with `None`.
    pub fn pin(&mut self, id: &str, side: Option<PinSide>) -> bool {
        if self.can_hide(id).is_none() {
            return false;
        }
        match side {
            Some(side) => self.current.pinned.insert(id.to_string(), side),
            None => self.current.pinned.remove(id),
        };
        self.persist();
        true
    }

    /// Restore the caller-supplied defaults (and persist them).
    pub fn reset(&mut self) {
        self.current = self.defaults.clone();
        self.persist();
    }

    /// Visible column ids in display order: left-pinned, unpinned,
    /// right-pinned, each group following `order`.
    pub fn display_order(&self) -> Vec<String> {
        let mut ordered = Vec::with_capacity(self.current.order.len());
        for side in [Some(PinSide::Left), None, Some(PinSide::Right)] {
            ordered.extend(
                self.current
                    .order
                    .iter()
                    .filter(|id| self.current.is_visible(id) && self.current.pin_side(id) == side)
                    .cloned(),
            );
        }
        ordered
    }
}

/// Drop unknown ids and append columns missing from `order`.
fn normalize(mut config: ColumnConfig, columns: &[(String, bool)]) -> ColumnConfig {
    let known = |id: &String| columns.iter().any(|(col, _)| col == id);

    let mut order: Vec<String> = Vec::with_capacity(columns.len());
    for id in config.order.drain(..) {
        if known(&id) && !order.contains(&id) {
            order.push(id);
        }
    }
    for (id, _) in columns {
        if !order.contains(id) {
            order.push(id.clone());
        }
    }
    config.order = order;
    config.visibility.retain(|id, _| known(id));
    config.pinned.retain(|id, _| known(id));

    // Columns that cannot be hidden are always shown.
    for (id, can_hide) in columns {
        if !can_hide {
            config.visibility.remove(id);
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    fn columns() -> Vec<(String, bool)> {
        vec![
            ("name".into(), false),
            ("email".into(), true),
            ("phone".into(), true),
            ("company".into(), true),
        ]
    }

    fn manager(store: Option<Arc<dyn ConfigStore>>) -> ColumnConfigManager {
        ColumnConfigManager::new(
            columns(),
            ColumnConfig::default().hidden("phone"),
            store,
            Some("contacts".into()),
        )
    }

    struct FailingStore;

    impl ConfigStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }

        fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn test_defaults_are_normalized() {
        let manager = manager(None);
        assert_eq!(
            manager.config().order,
            vec!["name", "email", "phone", "company"]
        );
        assert_eq!(manager.display_order(), vec!["name", "email", "company"]);
    }

    #[test]
    fn test_toggle_respects_can_hide() {
        let mut manager = manager(None);
        assert!(!manager.toggle("name"));
        assert!(manager.is_visible("name"));

        assert!(manager.toggle("email"));
        assert!(!manager.is_visible("email"));
        assert!(!manager.toggle("missing"));
    }

    #[test]
    fn test_hide_all_keeps_unhideable_columns() {
        let mut manager = manager(None);
        manager.hide_all();
        assert_eq!(manager.display_order(), vec!["name"]);

        manager.show_all();
        assert_eq!(
            manager.display_order(),
            vec!["name", "email", "phone", "company"]
        );
    }

    #[test]
    fn test_reorder_splice_moves() {
        let mut manager = manager(None);
        assert!(manager.reorder(3, 0));
        assert_eq!(
            manager.config().order,
            vec!["company", "name", "email", "phone"]
        );
        assert!(!manager.reorder(0, 4));
    }

    #[test]
    fn test_pinned_columns_lead_and_trail() {
        let mut manager = manager(None);
        manager.pin("company", Some(PinSide::Left));
        manager.pin("name", Some(PinSide::Right));
        assert_eq!(manager.display_order(), vec!["company", "email", "name"]);

        manager.pin("name", None);
        assert_eq!(manager.display_order(), vec!["company", "name", "email"]);
    }

    #[test]
    fn test_write_through_and_hydrate() {
        let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::new());

        let mut first = manager(Some(store.clone()));
        first.toggle("email");
        first.reorder(2, 0);

        let stored = store.get("contacts").unwrap().unwrap();
        assert_eq!(stored["visibility"]["email"], json!(false));

        let second = manager(Some(store));
        assert_eq!(second.config(), first.config());
    }

    #[test]
    fn test_reset_restores_caller_defaults() {
        let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::new());
        let mut manager = manager(Some(store.clone()));
        manager.show_all();
        manager.pin("email", Some(PinSide::Left));

        manager.reset();
        assert!(!manager.is_visible("phone"));
        assert_eq!(manager.config(), manager.defaults());

        let stored: ColumnConfig =
            serde_json::from_value(store.get("contacts").unwrap().unwrap()).unwrap();
        assert_eq!(&stored, manager.defaults());
    }

    #[test]
    fn test_store_failures_are_swallowed() {
        let mut manager = manager(Some(Arc::new(FailingStore)));
        assert!(manager.toggle("email"));
        assert!(!manager.is_visible("email"));
    }

    #[test]
    fn test_malformed_blob_is_ignored() {
        let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::new());
        store.set("contacts", json!({"order": 42})).unwrap();

        let manager = manager(Some(store));
        assert_eq!(manager.config(), manager.defaults());
    }

    #[test]
    fn test_stale_ids_in_stored_blob_are_dropped() {
        let store: Arc<dyn ConfigStore> = Arc::new(MemoryStore::new());
        store
            .set(
                "contacts",
                json!({"order": ["legacy", "email"], "visibility": {"legacy": false, "name": false}}),
            )
            .unwrap();

        let manager = manager(Some(store));
        assert_eq!(
            manager.config().order,
            vec!["email", "name", "phone", "company"]
        );
        assert!(manager.is_visible("name"));
        assert!(!manager.config().visibility.contains_key("legacy"));
    }
}
