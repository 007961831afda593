//! CSV export errors

use thiserror::Error;

/// Errors that can occur while producing or writing a CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The CSV writer failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row could not be serialized.
    #[error("row serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing the file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Columns were inferred from a row that is not a JSON object.
    #[error("cannot infer export columns: row serialized to {0}, expected an object")]
    NotAnObject(&'static str),
}
