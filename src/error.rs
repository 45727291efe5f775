//! Error types for odsstream

use thiserror::Error;

/// Result type alias for odsstream operations
pub type Result<T> = std::result::Result<T, OdsError>;

/// Main error type for all document operations
#[derive(Error, Debug)]
pub enum OdsError {
    /// IO error from the archive
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument given to a model operation (negative span, span from a covered cell)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Table not found by name or position
    #[error("Table '{table}' not found. Available tables: {available}")]
    TableNotFound { table: String, available: String },

    /// The closing tag of the table was already written
    #[error("Table '{0}' is closed: its closing tag was already written")]
    TableClosed(String),

    /// The row was already handed to the writer
    #[error("Row {row} of table '{table}' was already flushed")]
    RowAlreadyFlushed { table: String, row: usize },

    /// The table header (columns) was already written
    #[error("Header of table '{0}' was already written")]
    TableHeaderWritten(String),

    /// The document was finalized, no more mutation or flush is allowed
    #[error("Document is finalized")]
    DocumentFinalized,

    /// Flush protocol or emitter state violated
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The writer thread stopped without reporting an error
    #[error("Writer stopped: {0}")]
    WriterStopped(String),
}

impl OdsError {
    pub(crate) fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        OdsError::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_state<S: Into<String>>(msg: S) -> Self {
        OdsError::InvalidState(msg.into())
    }
}
