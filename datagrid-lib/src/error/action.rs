//! Bulk action error type

use thiserror::Error;

/// Error returned by a failing bulk action.
#[derive(Debug, Clone, Error)]
#[error("bulk action '{action}' failed: {message}")]
pub struct BulkActionError {
    /// Label of the action that failed.
    pub action: String,
    /// Error message
    pub message: String,
}

impl BulkActionError {
    /// Create a new bulk action error.
    ///
    /// The action label is filled in by the table when it surfaces the error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            action: String::new(),
            message: message.into(),
        }
    }

    pub(crate) fn with_action(mut self, label: &str) -> Self {
        self.action = label.to_string();
        self
    }
}

impl From<String> for BulkActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for BulkActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
