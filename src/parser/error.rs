//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer does not contain a complete header block yet.
    ///
    /// The caller decides whether to wait for more bytes or to reject the request.
    #[error("Incomplete request: header block terminator not found")]
    Incomplete,

    /// The request line is malformed (missing method, URI or version).
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// A header line has no `:` separator and the parser runs in strict mode.
    #[error("Invalid header format: {0}")]
    InvalidHeaderFormat(String),

    /// Too many malformed header lines were skipped in lenient mode.
    #[error("Too many invalid header lines: {0}")]
    TooManyInvalidHeaders(usize),

    /// The header block is not valid UTF-8.
    #[error("Request head is not valid UTF-8")]
    InvalidUtf8,

    /// A header required by the caller is missing from the request.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// Error parsing JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means "wait for more bytes" rather than "reject".
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Error::Incomplete)
    }

    /// Whether the request should be answered with `400 Bad Request`.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::MalformedRequestLine(_)
                | Error::InvalidHeaderFormat(_)
                | Error::TooManyInvalidHeaders(_)
                | Error::InvalidUtf8
        )
    }
}
