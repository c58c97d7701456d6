//! Error types for the HTTP server.

use std::path::PathBuf;
use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The request did not fit into the read buffer.
    #[error("Request exceeds the read buffer of {0} bytes")]
    RequestTooLarge(usize),

    /// Invalid server configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Failures of the static file pipeline.
///
/// `PathRejected` and `NotFound` both become a 404 so that clients cannot
/// probe the layout of the filesystem; `ReadError` becomes a 500.
#[derive(Debug, Error)]
pub enum StaticFileError {
    /// The URI failed the traversal check.
    #[error("Rejected path: {0}")]
    PathRejected(String),

    /// The path does not exist or is not a regular file.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file could not be read completely.
    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
