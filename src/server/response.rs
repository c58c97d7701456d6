//! HTTP response types and the wire serializer.

use std::fmt;
use std::io::{self, Write};
use serde::Serialize;

use crate::parser::{Headers, HttpVersion};
use crate::server::error::Error;

/// Content type emitted when a body is present and the handler set none.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An HTTP status code.
///
/// Any integer is accepted; the associated constants cover the codes this
/// crate produces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const CREATED: StatusCode = StatusCode(201);
    pub const ACCEPTED: StatusCode = StatusCode(202);
    pub const NO_CONTENT: StatusCode = StatusCode(204);
    pub const MOVED_PERMANENTLY: StatusCode = StatusCode(301);
    pub const FOUND: StatusCode = StatusCode(302);
    pub const NOT_MODIFIED: StatusCode = StatusCode(304);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const UNAUTHORIZED: StatusCode = StatusCode(401);
    pub const FORBIDDEN: StatusCode = StatusCode(403);
    pub const NOT_FOUND: StatusCode = StatusCode(404);
    pub const METHOD_NOT_ALLOWED: StatusCode = StatusCode(405);
    pub const PAYLOAD_TOO_LARGE: StatusCode = StatusCode(413);
    pub const URI_TOO_LONG: StatusCode = StatusCode(414);
    pub const REQUEST_HEADER_FIELDS_TOO_LARGE: StatusCode = StatusCode(431);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);
    pub const NOT_IMPLEMENTED: StatusCode = StatusCode(501);
    pub const BAD_GATEWAY: StatusCode = StatusCode(502);
    pub const SERVICE_UNAVAILABLE: StatusCode = StatusCode(503);
    pub const HTTP_VERSION_NOT_SUPPORTED: StatusCode = StatusCode(505);

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Get the reason phrase for this status code, empty when unknown.
    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            413 => "Payload Too Large",
            414 => "URI Too Long",
            431 => "Request Header Fields Too Large",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            505 => "HTTP Version Not Supported",
            _ => "",
        }
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// The version written on the status line
    pub version: HttpVersion,
    /// The HTTP headers, written in this order
    pub headers: Headers,
    /// The response body
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    /// Create a new HTTP response with the given status code and no headers.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            version: HttpVersion::Http11,
            headers: Headers::new(),
            body: None,
        }
    }

    /// A `text/plain` response with the given status and body.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_content_type("text/plain")
            .with_body_string(body)
    }

    /// A `text/html` response with the given status and body.
    pub fn html(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_content_type("text/html")
            .with_body_string(body)
    }

    pub fn bad_request() -> Self {
        Self::text(StatusCode::BAD_REQUEST, "Bad request")
    }

    pub fn not_found() -> Self {
        Self::text(StatusCode::NOT_FOUND, "Page not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::text(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    pub fn internal_error() -> Self {
        Self::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn service_unavailable() -> Self {
        Self::text(
            StatusCode::SERVICE_UNAVAILABLE,
            "Server is at capacity, please try again later",
        )
    }

    /// Set the response body with a string.
    pub fn with_body_string(self, body: impl Into<String>) -> Self {
        self.with_body_bytes(body.into().into_bytes())
    }

    /// Set the response body with bytes. An empty buffer means "no body".
    pub fn with_body_bytes(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// Append a header. Repeated names are kept as separate lines.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set the content type, replacing any previous one.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.headers.set("Content-Type", content_type);
        self
    }

    /// Set the status line version.
    pub fn with_version(mut self, version: HttpVersion) -> Self {
        self.version = version;
        self
    }

    /// Set the response body with a JSON value.
    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self, Error> {
        let json = serde_json::to_vec(value).map_err(Error::JsonError)?;
        Ok(self
            .with_content_type("application/json")
            .with_body_bytes(json))
    }

    /// Length of the body, zero when there is none.
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }

    /// Serialize the response into `sink`.
    ///
    /// Writes the status line, the stored headers in order, a fallback
    /// `Content-Type` and a computed `Content-Length` when a body is present,
    /// the blank line and the body. Stored `Content-Length` headers are not
    /// written; the length always comes from the body.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        let reason = self.status.reason_phrase();
        write!(sink, "{} {} {}\r\n", self.version, self.status.0, reason)?;

        for (name, value) in self.headers.iter() {
            if name.eq_ignore_ascii_case("Content-Length") {
                continue;
            }
            write!(sink, "{name}: {value}\r\n")?;
        }

        if let Some(body) = self.body.as_deref().filter(|body| !body.is_empty()) {
            if !self.headers.contains("Content-Type") {
                write!(sink, "Content-Type: {FALLBACK_CONTENT_TYPE}\r\n")?;
            }
            write!(sink, "Content-Length: {}\r\n\r\n", body.len())?;
            sink.write_all(body)?;
        } else {
            sink.write_all(b"\r\n")?;
        }

        Ok(())
    }

    /// Convert the response to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(128 + self.body_len());
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut bytes);
        bytes
    }
}
