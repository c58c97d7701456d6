//! HTTP protocol versions.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// HTTP/1.x protocol versions understood when echoing a version back.
///
/// Requests keep their version token verbatim; this type is only used where
/// the crate has to pick a version for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVersion {
    Http10,
    #[default]
    Http11,
}

/// The version token was not `HTTP/1.0` or `HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported HTTP version: {0}")]
pub struct UnsupportedVersion(pub String);

impl FromStr for HttpVersion {
    type Err = UnsupportedVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HTTP/1.0" => Ok(HttpVersion::Http10),
            "HTTP/1.1" => Ok(HttpVersion::Http11),
            _ => Err(UnsupportedVersion(s.to_string())),
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpVersion::Http10 => write!(f, "HTTP/1.0"),
            HttpVersion::Http11 => write!(f, "HTTP/1.1"),
        }
    }
}
