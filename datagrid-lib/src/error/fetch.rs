//! Fetch error type for server-driven pagination.

use thiserror::Error;

/// Message shown when a fetcher fails without saying why.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch data";

/// Error returned by a [`PageFetcher`](crate::pagination::PageFetcher).
///
/// The table only ever surfaces the message, so fetchers are free to
/// collapse whatever transport error they hit into a string.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    /// Error message
    pub message: String,
}

impl FetchError {
    /// Create a new fetch error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message to display, falling back to a generic one when empty.
    pub fn display_message(&self) -> String {
        if self.message.trim().is_empty() {
            FETCH_FALLBACK_MESSAGE.to_string()
        } else {
            self.message.clone()
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for FetchError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for FetchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
