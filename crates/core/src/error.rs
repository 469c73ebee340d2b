//! Error types for sheetport.

use sheetport_sheet::SheetError;
use thiserror::Error;

/// Result type for sheetport operations.
pub type Result<T> = std::result::Result<T, HelperError>;

/// Errors that can occur in the sheetport pipeline.
#[derive(Debug, Error)]
pub enum HelperError {
    /// Decoding or encoding a sheet failed.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// File extension is not one of the accepted formats.
    #[error("Unsupported file format: '{ext}'. Supported: csv, xlsx")]
    UnsupportedFormat { ext: String },

    /// A custom key mapping does not cover a source key.
    #[error("No new key given for '{key}'")]
    MissingRename { key: String },

    /// Two columns would end up with the same key.
    #[error("Duplicate field key: {key}")]
    DuplicateField { key: String },

    /// An operation names a field the dataset does not have.
    #[error("Field not found: {name}")]
    FieldNotFound { name: String },

    /// A grouped export selects a value that has no group.
    #[error("No group for value '{key}'")]
    UnknownGroup { key: String },

    /// Writing an export file failed.
    #[error("Export failed for {file}: {message}")]
    Export { file: String, message: String },

    /// The storage backend could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
