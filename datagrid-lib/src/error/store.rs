//! Column configuration store errors

use thiserror::Error;

/// Errors raised by a [`ConfigStore`](crate::store::ConfigStore).
///
/// The table never propagates these; they are logged and dropped so a broken
/// store behaves like no store at all.
#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
