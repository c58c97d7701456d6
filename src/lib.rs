//! A minimal HTTP/1.x message-processing engine.
//!
//! The crate turns one complete request buffer into an [`HttpRequest`],
//! dispatches it through an exact-match [`Router`] (optionally backed by a
//! sandboxed [`StaticFiles`] handler) and serializes the resulting
//! [`HttpResponse`] back into wire bytes.
//!
//! # Features
//!
//! - Parse request heads from byte slices with capped, truncating fields
//! - Ordered, case-insensitive headers that keep repeated names
//! - Exact-match routing on method and path with a replaceable fallback
//! - Static files from a document root with traversal rejection and MIME detection
//! - Byte-exact response serialization with a computed `Content-Length`
//! - A small tokio server that runs one request per connection
//!
//! # Examples
//!
//! ## Parsing
//!
//! ```
//! use microhttp_rs::parse_request;
//!
//! let request_bytes = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
//!
//! match parse_request(request_bytes) {
//!     Ok(request) => {
//!         println!("Method: {}", request.method);
//!         println!("URI: {}", request.uri);
//!         println!("Version: {}", request.version);
//!         for (name, value) in request.headers.iter() {
//!             println!("{name}: {value}");
//!         }
//!     },
//!     Err(err) => {
//!         println!("Error parsing request: {}", err);
//!     }
//! }
//! ```
//!
//! ## Error handling
//!
//! ```
//! use microhttp_rs::{parse_request, ParserError};
//!
//! match parse_request(b"BADLINE\r\n\r\n") {
//!     Ok(_) => println!("Request parsed successfully"),
//!     Err(ParserError::Incomplete) => println!("Need more bytes"),
//!     Err(err) if err.is_malformed() => println!("400 Bad Request: {}", err),
//!     Err(err) => println!("Other error: {}", err),
//! }
//! ```
//!
//! ## Routing and serialization
//!
//! ```
//! use microhttp_rs::{parse_request, HttpRequest, HttpResponse, Router, StatusCode};
//!
//! let mut router = Router::new();
//! router.get("/hello", |_req: &HttpRequest| HttpResponse::text(StatusCode::OK, "Hello, World!"));
//!
//! let request = parse_request(b"GET /hello HTTP/1.1\r\n\r\n").unwrap();
//! let bytes = router.dispatch(&request).to_bytes();
//!
//! assert_eq!(
//!     bytes,
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 13\r\n\r\nHello, World!".to_vec()
//! );
//! ```
//!
//! See the `demos` directory for a runnable server.

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{
    Error as ParserError, Headers, HttpRequest, HttpVersion, Method, ParserLimits, RequestParser,
    parse_request,
};
pub use server::{
    Error as ServerError, Handler, HttpResponse, HttpServer, Router, ServerConfig, StaticFileError,
    StaticFiles, StatusCode,
};
