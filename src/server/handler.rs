//! HTTP request handlers and route bindings.

use std::fmt;

use crate::parser::{HttpRequest, Method};
use crate::server::{HttpResponse, StatusCode};

/// Something that turns a request into a response.
///
/// Closures of the shape `Fn(&HttpRequest) -> HttpResponse` implement this
/// automatically. Handlers are shared between connection tasks, hence the
/// `Send + Sync` bound.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &HttpRequest) -> HttpResponse;
}

impl<F> Handler for F
where
    F: Fn(&HttpRequest) -> HttpResponse + Send + Sync,
{
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        self(request)
    }
}

/// Boxed handler as stored in the route table.
pub type BoxedHandler = Box<dyn Handler>;

/// Represents a route in the HTTP server.
pub struct Route {
    /// The method to match, compared for equality.
    pub method: Method,
    /// The path to match, compared byte for byte.
    pub path: String,
    /// The handler function.
    pub handler: BoxedHandler,
}

impl Route {
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path == path
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// `GET /` in the demo application.
pub fn home_page(_request: &HttpRequest) -> HttpResponse {
    HttpResponse::html(
        StatusCode::OK,
        "<html><body><h1>Welcome to our HTTP Server!</h1></body></html>",
    )
}

/// `GET /hello` in the demo application.
pub fn hello_page(_request: &HttpRequest) -> HttpResponse {
    HttpResponse::text(StatusCode::OK, "Hello, World!")
}

/// Default fallback of a [`Router`](crate::server::Router).
pub fn not_found(_request: &HttpRequest) -> HttpResponse {
    HttpResponse::not_found()
}
