//! Domain errors with a fixed shape.
//!
//! Everything else (I/O, HTTP, serialization) travels as `Box<dyn Error>`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// A required element was absent from an article page.
    #[error("article page {address} has no {field}")]
    MissingField { address: String, field: &'static str },

    /// The numeric article id could not be taken from the end of the URL.
    #[error("no article id at the end of {0}")]
    MissingId(String),

    #[error("invalid date {0:?}, expected YYYY-M-D")]
    InvalidDate(String),

    #[error("end date {end} is before start date {start}")]
    DateOrder { start: String, end: String },

    /// A spreadsheet row did not follow the import schema.
    #[error("row {row}: {reason}")]
    BadRow { row: usize, reason: String },

    /// The server answered with an error status on every attempt; the page
    /// is taken to be gone.
    #[error("{url} answered HTTP {status} after {attempts} attempts")]
    Unreachable {
        url: String,
        status: u16,
        attempts: usize,
    },

    /// No response at all (refused connection, DNS failure, timeout). Says
    /// nothing about whether the page exists.
    #[error("{url} could not be fetched after {attempts} attempts: {reason}")]
    Network {
        url: String,
        attempts: usize,
        reason: String,
    },
}
