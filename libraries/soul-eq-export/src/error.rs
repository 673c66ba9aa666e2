//! Error types for preset export and import

use thiserror::Error;

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur around preset files
///
/// Converters themselves never fail; these cover format lookup, importing
/// and writing files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// No format registered under this id
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Format has no importer
    #[error("Format does not support import: {0}")]
    ImportUnsupported(String),

    /// Text preset could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// JSON preset could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the exported file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Imported bands failed validation
    #[error(transparent)]
    Eq(#[from] soul_eq::EqError),
}

impl ExportError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
