//! Capacities for every bounded field of a parsed request.
//!
//! Fields are stored in growable containers, but every append goes through
//! [`push_capped`], which keeps at most `capacity - 1` bytes. Over-long input
//! is truncated, never rejected.

use serde::{Deserialize, Serialize};

/// Maximum number of headers kept per request.
pub const MAX_HEADERS: usize = 50;
/// Capacity of a single header name or value.
pub const MAX_HEADER_SIZE: usize = 256;
/// Capacity of the request URI.
pub const MAX_URI_SIZE: usize = 1024;
/// Capacity of the method token.
pub const MAX_METHOD_SIZE: usize = 16;
/// Capacity of the version token.
pub const MAX_VERSION_SIZE: usize = 16;
/// Malformed header lines skipped in lenient mode before the request is rejected.
pub const MAX_INVALID_HEADERS: usize = 8;

/// What the parser does with a header line that has no `:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Fail the whole request.
    Strict,
    /// Skip the line, up to `max_invalid_headers` times.
    #[default]
    Lenient,
}

/// Parser capacities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserLimits {
    pub max_headers: usize,
    pub max_header_size: usize,
    pub max_uri_size: usize,
    pub max_method_size: usize,
    pub max_version_size: usize,
    pub header_policy: HeaderPolicy,
    pub max_invalid_headers: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_headers: MAX_HEADERS,
            max_header_size: MAX_HEADER_SIZE,
            max_uri_size: MAX_URI_SIZE,
            max_method_size: MAX_METHOD_SIZE,
            max_version_size: MAX_VERSION_SIZE,
            header_policy: HeaderPolicy::default(),
            max_invalid_headers: MAX_INVALID_HEADERS,
        }
    }
}

impl ParserLimits {
    /// Limits that reject malformed header lines instead of skipping them.
    pub fn strict() -> Self {
        Self {
            header_policy: HeaderPolicy::Strict,
            ..Self::default()
        }
    }
}

/// Copy `value` into an owned string holding at most `capacity - 1` bytes.
///
/// The cut lands on a character boundary, so the kept prefix may be a few
/// bytes shorter than the limit for multi-byte input.
pub fn push_capped(value: &str, capacity: usize) -> String {
    let max = capacity.saturating_sub(1);
    if value.len() <= max {
        return value.to_string();
    }

    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}
