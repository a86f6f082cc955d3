//! Error types for the tabscrub library.

use std::io;
use thiserror::Error;

/// Result type alias for tabscrub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tabscrub library.
///
/// The cleaning pipeline itself never produces errors: it accepts any
/// string or cell and always returns one. Errors arise only while reading,
/// flattening, or writing tabular data.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input format is not recognized.
    #[error("Unknown input format")]
    UnknownFormat,

    /// The input format was recognized but support for it is not compiled in.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Spreadsheet parsing error.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// The JSON root is neither an object nor an array.
    ///
    /// A usage error rather than a processing failure: flattening is only
    /// defined for a record or a list of records. Carries the kind of value
    /// found at the root.
    #[error("JSON root must be an object or an array, found {0}")]
    InvalidRootShape(&'static str),

    /// Invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A row does not match the table's column count.
    #[error("Row has {found} cells, expected {expected}")]
    RowLength { expected: usize, found: usize },
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

#[cfg(feature = "xlsx")]
impl From<calamine::XlsxError> for Error {
    fn from(err: calamine::XlsxError) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}
