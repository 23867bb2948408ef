//! Error types for frascraper.
//!
//! Page-level failures carry the offset they occurred at so an aborted
//! run can be restarted by hand from the right place.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for frascraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Main error type for the fetch/filter/export pipeline.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Request could not be sent or its body could not be read.
    #[error("transport failure at offset {offset}: {source}")]
    Transport {
        offset: usize,
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("server returned {status} at offset {offset}")]
    Status { status: StatusCode, offset: usize },

    /// The page body was not a JSON array of records.
    #[error("malformed page payload at offset {offset}: {source}")]
    MalformedPayload {
        offset: usize,
        source: serde_json::Error,
    },

    /// The configured endpoint URL does not parse.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A record lacks one of the projected columns.
    #[error("record is missing expected column `{column}`")]
    MissingColumn { column: String },

    /// A record's date field does not parse as a calendar date.
    #[error("unparsable report date `{value}`")]
    DateParse { value: String },

    /// I/O error while writing the export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error while writing the export.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}
