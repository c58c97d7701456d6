//! HTTP server implementation for microhttp-rs.
//!
//! Routing, static files and response serialization are synchronous; only
//! the connection layer in [`HttpServer`] runs on tokio.

mod response;
mod config;
mod error;
pub mod handler;
mod http_server;
mod router;
pub mod static_files;

// Re-export public items
pub use response::{HttpResponse, StatusCode, FALLBACK_CONTENT_TYPE};
pub use config::ServerConfig;
pub use error::{Error, StaticFileError};
pub use handler::{Handler, Route};
pub use http_server::HttpServer;
pub use router::Router;
pub use static_files::{resolve_and_load, StaticFiles};
