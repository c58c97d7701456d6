//! HTTP request parsing and representation.

use std::collections::HashMap;
use std::str::FromStr;
use log::debug;
use serde::de::DeserializeOwned;

use crate::parser::error::Error;
use crate::parser::headers::Headers;
use crate::parser::limits::{push_capped, HeaderPolicy, ParserLimits};
use crate::parser::lines::{find_header_end, lines, tokens};
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// Represents an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, path plus optional query, as received
    pub uri: String,
    /// The HTTP version token, as received
    pub version: String,
    /// The HTTP headers, in received order
    pub headers: Headers,
    /// The request body, if the caller attached one
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a new HTTP request without a body.
    pub fn new(method: Method, uri: impl Into<String>, version: impl Into<String>, headers: Headers) -> Self {
        Self {
            method,
            uri: uri.into(),
            version: version.into(),
            headers,
            body: None,
        }
    }

    /// Create a new HTTP request with a body.
    pub fn with_body(
        method: Method,
        uri: impl Into<String>,
        version: impl Into<String>,
        headers: Headers,
        body: Vec<u8>,
    ) -> Self {
        Self::new(method, uri, version, headers).attach_body(body)
    }

    /// Attach body bytes that the caller extracted from its buffer.
    ///
    /// An empty buffer is stored as "no body".
    pub fn attach_body(mut self, body: Vec<u8>) -> Self {
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// The URI without its query component.
    pub fn path(&self) -> &str {
        match self.uri.split_once('?') {
            Some((path, _)) => path,
            None => &self.uri,
        }
    }

    /// The query component of the URI, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.uri.split_once('?').map(|(_, query)| query)
    }

    /// Query parameters parsed from the URI. Keys without `=` map to an empty value.
    pub fn query_params(&self) -> HashMap<&str, &str> {
        self.query()
            .map(|query| {
                query
                    .split('&')
                    .filter(|s| !s.is_empty())
                    .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get a query parameter value.
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params().get(name).copied()
    }

    /// Check if a query parameter exists.
    pub fn has_query_param(&self, name: &str) -> bool {
        self.get_query_param(name).is_some()
    }

    /// Get the first value of a header, case-insensitive.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains(name)
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    /// Length of the attached body, zero when there is none.
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }

    /// The declared `Content-Length`, if present and numeric.
    pub fn content_length(&self) -> Option<usize> {
        self.get_header("Content-Length")
            .and_then(|value| value.trim().parse().ok())
    }

    /// The version as an enum, if it is HTTP/1.0 or HTTP/1.1.
    pub fn http_version(&self) -> Option<HttpVersion> {
        HttpVersion::from_str(&self.version).ok()
    }

    /// Parse the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::MissingHeader("Content-Type: application/json".to_string()));
        }

        let body = self.body.as_deref().unwrap_or_default();
        Ok(serde_json::from_slice(body)?)
    }

    /// Check if the Content-Type header is application/json.
    pub fn is_json(&self) -> bool {
        self.get_header("Content-Type")
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }
}

/// Split a buffer at the end of its header block.
///
/// Returns the head (without the terminator) and whatever follows it.
pub fn split_head_and_body(input: &[u8]) -> Option<(&[u8], &[u8])> {
    find_header_end(input).map(|end| (&input[..end.start], &input[end.body_start..]))
}

/// Request parser with configurable capacities.
#[derive(Debug, Clone, Default)]
pub struct RequestParser {
    limits: ParserLimits,
}

impl RequestParser {
    pub fn new(limits: ParserLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ParserLimits {
        &self.limits
    }

    /// Parse the request head contained in `input`.
    ///
    /// The body is never extracted here; see [`split_head_and_body`] and
    /// [`HttpRequest::attach_body`].
    pub fn parse(&self, input: &[u8]) -> Result<HttpRequest, Error> {
        let (head, _) = split_head_and_body(input).ok_or(Error::Incomplete)?;
        let head = std::str::from_utf8(head).map_err(|_| Error::InvalidUtf8)?;

        let mut lines = lines(head);
        let request_line = lines.next().unwrap_or_default();

        let mut parts = tokens(request_line);
        let (method, uri, version) = match (parts.next(), parts.next(), parts.next()) {
            (Some(method), Some(uri), Some(version)) => (method, uri, version),
            _ => return Err(Error::MalformedRequestLine(request_line.to_string())),
        };

        let limits = &self.limits;
        let method = Method::from_str(&push_capped(method, limits.max_method_size))?;
        let uri = push_capped(uri, limits.max_uri_size);
        let version = push_capped(version, limits.max_version_size);

        let headers = self.parse_headers(lines)?;

        Ok(HttpRequest::new(method, uri, version, headers))
    }

    fn parse_headers<'a>(&self, lines: impl Iterator<Item = &'a str>) -> Result<Headers, Error> {
        let limits = &self.limits;
        let mut headers = Headers::new();
        let mut skipped = 0;

        for line in lines {
            if line.is_empty() {
                break;
            }
            if headers.len() >= limits.max_headers {
                debug!("Header capacity of {} reached, dropping the rest", limits.max_headers);
                break;
            }

            let Some((name, value)) = line.split_once(':') else {
                match limits.header_policy {
                    HeaderPolicy::Strict => return Err(Error::InvalidHeaderFormat(line.to_string())),
                    HeaderPolicy::Lenient => {
                        skipped += 1;
                        if skipped > limits.max_invalid_headers {
                            return Err(Error::TooManyInvalidHeaders(skipped));
                        }
                        debug!("Skipping malformed header line: {line:?}");
                        continue;
                    }
                }
            };

            let value = value.trim_start_matches([' ', '\t']);
            headers.append(
                push_capped(name, limits.max_header_size),
                push_capped(value, limits.max_header_size),
            );
        }

        Ok(headers)
    }
}

/// Parse an HTTP request from a byte slice using the default limits.
///
/// # Arguments
///
/// * `input` - A byte slice containing at least a complete request head
///
/// # Returns
///
/// The parsed HTTP request, or an error if the head is incomplete or invalid
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    RequestParser::default().parse(input)
}
