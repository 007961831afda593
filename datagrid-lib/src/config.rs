//! Table configuration

use serde::{Deserialize, Serialize};

/// What happens to the selection after a bulk action finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionClearPolicy {
    /// Clear only when the action succeeded; a failed action keeps the
    /// selection so the user can retry.
    #[default]
    OnSuccess,
    /// Clear whether the action succeeded or not.
    Always,
}

/// One column of a CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportColumn {
    /// Key looked up in the row's serialized JSON object.
    pub key: String,
    /// Header label. Defaults to the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl ExportColumn {
    /// Export a key under its own name.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: None,
        }
    }

    /// Export a key under a different header label.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// The label written to the header row.
    pub fn label(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.key)
    }
}

/// Configuration for a [`DataTable`](crate::table::DataTable).
///
/// # Example
///
/// ```
/// use datagrid_lib::config::TableConfig;
///
/// let config = TableConfig::default()
///     .with_page_size(25)
///     .with_searchable_columns(["name", "email"])
///     .with_storage_key("contacts-table");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page before the user picks another size.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Page shown (client) or fetched (server) first.
    ///
    /// Default: 0
    pub initial_page_index: usize,

    /// Sizes offered by the footer's page-size picker.
    pub page_size_options: Vec<usize>,

    /// Fetch the initial page on the first `mount()` in server mode.
    ///
    /// Default: true
    pub fetch_on_mount: bool,

    /// Column ids the global search looks at. Empty means every visible column.
    pub searchable_columns: Vec<String>,

    /// File stem of the CSV export.
    ///
    /// Default: "export"
    pub export_filename: String,

    /// Columns of the CSV export. Empty means the keys of the first row.
    pub export_columns: Vec<ExportColumn>,

    /// Viewport width (px) below which a mobile card renderer takes over.
    ///
    /// Default: 768
    pub mobile_breakpoint: u32,

    /// Key under which column configuration is persisted. `None` disables
    /// persistence even when a store is attached.
    pub storage_key: Option<String>,

    /// Selection handling after a bulk action.
    pub selection_clear_policy: SelectionClearPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            initial_page_index: 0,
            page_size_options: vec![10, 20, 30, 50, 100],
            fetch_on_mount: true,
            searchable_columns: Vec::new(),
            export_filename: "export".to_string(),
            export_columns: Vec::new(),
            mobile_breakpoint: 768,
            storage_key: None,
            selection_clear_policy: SelectionClearPolicy::OnSuccess,
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default page size. Zero is bumped to one.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Sets the initial page index.
    pub fn with_initial_page_index(mut self, index: usize) -> Self {
        self.initial_page_index = index;
        self
    }

    /// Sets the page sizes offered in the footer.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Enables or disables the mount-time fetch.
    pub fn with_fetch_on_mount(mut self, enabled: bool) -> Self {
        self.fetch_on_mount = enabled;
        self
    }

    /// Restricts global search to the given column ids.
    pub fn with_searchable_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the export file stem.
    pub fn with_export_filename(mut self, name: impl Into<String>) -> Self {
        self.export_filename = name.into();
        self
    }

    /// Sets explicit export columns.
    pub fn with_export_columns(mut self, columns: impl Into<Vec<ExportColumn>>) -> Self {
        self.export_columns = columns.into();
        self
    }

    /// Sets the mobile breakpoint in pixels.
    pub fn with_mobile_breakpoint(mut self, px: u32) -> Self {
        self.mobile_breakpoint = px;
        self
    }

    /// Persists column configuration under `key`.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// Sets the bulk-action selection policy.
    pub fn with_selection_clear_policy(mut self, policy: SelectionClearPolicy) -> Self {
        self.selection_clear_policy = policy;
        self
    }
}
