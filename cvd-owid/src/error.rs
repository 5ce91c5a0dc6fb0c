/// Error types for parsing and fetching OWID data
use thiserror::Error;

/// Main error type for dataset operations
#[derive(Error, Debug)]
pub enum OwidError {
    /// Failed to read or write CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header has neither a `location` nor a `date` column, so the
    /// source is not a dataset at all (an HTML page, for instance)
    #[error("Source is not a dataset: header {0:?} has no location or date column")]
    UnrecognizedHeader(String),

    /// A required column is not in the header
    #[error("Required column `{0}` is missing")]
    MissingColumn(&'static str),

    /// The date cell of a row could not be parsed
    #[error("Failed to parse date {value:?} on line {line}")]
    InvalidDate { line: u64, value: String },

    /// A numeric cell held something other than a number or a missing marker
    #[error("Failed to parse {column} value {value:?} on line {line}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Bad response status for {url}: {status}")]
    HttpStatus { url: String, status: u16 },

    /// The server answered with an empty body
    #[error("Empty response from {0}")]
    EmptyResponse(String),
}

impl OwidError {
    /// True when the source itself could not be read (missing file,
    /// network failure, malformed CSV framing, content that is not a
    /// dataset), as opposed to a readable dataset holding invalid data.
    pub fn is_read_failure(&self) -> bool {
        match self {
            OwidError::CsvParse(_)
            | OwidError::Io(_)
            | OwidError::HttpStatus { .. }
            | OwidError::EmptyResponse(_)
            | OwidError::UnrecognizedHeader(_) => true,
            #[cfg(feature = "api")]
            OwidError::HttpRequest(_) => true,
            OwidError::MissingColumn(_)
            | OwidError::InvalidDate { .. }
            | OwidError::InvalidNumber { .. } => false,
        }
    }
}

/// Type alias for Results using OwidError
pub type Result<T> = std::result::Result<T, OwidError>;
