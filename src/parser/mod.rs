//! HTTP parser module.
//!
//! Turns one complete in-memory request head into an [`HttpRequest`].
//! Every field is capped by [`ParserLimits`]; over-long input is truncated
//! instead of rejected.

mod request;
mod method;
mod version;
mod error;
mod headers;
pub mod limits;
pub mod lines;

// Re-export public items
pub use request::{HttpRequest, RequestParser, split_head_and_body};
pub use method::Method;
pub use version::{HttpVersion, UnsupportedVersion};
pub use error::Error;
pub use headers::Headers;
pub use limits::{HeaderPolicy, ParserLimits};

// Re-export the parse_request function
pub use request::parse_request;
