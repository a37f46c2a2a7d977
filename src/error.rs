//! Error types for opening archives and listing their entries.

use thiserror::Error;

use crate::list::StatusCode;

/// Errors raised while opening an archive or reading from its byte source.
#[derive(Debug, Error)]
pub enum ReadError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an unexpected status.
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// The server cannot serve byte ranges.
    #[error("remote server does not support Range requests")]
    RangeUnsupported,

    /// The server did not report the resource size.
    #[error("remote server did not return Content-Length")]
    MissingContentLength,

    /// Too many transient network failures in a row.
    #[error("max retries exceeded")]
    RetriesExhausted,

    /// Fewer bytes were available than requested.
    #[error("short read at offset {offset}: expected {expected} bytes, got {actual}")]
    ShortRead {
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// Could not find the end of central directory record.
    #[error("not a valid ZIP file: end of central directory not found")]
    EocdNotFound,

    /// ZIP64 locator or record is missing or malformed.
    #[error("invalid ZIP64 format")]
    InvalidZip64,

    /// The central directory does not fit in memory on this platform.
    #[error("central directory too large: {0} bytes")]
    CentralDirectoryTooLarge(u64),
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, ReadError>;

/// Errors that terminate a listing.
///
/// Each cursor failure carries the status code reported by the reader. Rows
/// written before the failure stay written.
#[derive(Debug, Error)]
pub enum ListError {
    /// The cursor could not be placed on the first entry.
    #[error("error {0} going to first entry in archive")]
    PositionFailed(StatusCode),

    /// Metadata for the current entry could not be read.
    #[error("error {0} getting entry info in archive")]
    MetadataFetchFailed(StatusCode),

    /// The cursor could not move past the current entry.
    #[error("error {0} going to next entry in archive")]
    AdvanceFailed(StatusCode),

    /// Writing to the output sink failed.
    #[error("failed to write listing: {0}")]
    Io(#[from] std::io::Error),
}

impl ListError {
    /// Status code reported by the reader, if the failure came from the cursor.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ListError::PositionFailed(code)
            | ListError::MetadataFetchFailed(code)
            | ListError::AdvanceFailed(code) => Some(*code),
            ListError::Io(_) => None,
        }
    }
}
