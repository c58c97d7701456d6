//! Exact-match request router.

use log::debug;

use crate::parser::{HttpRequest, Method};
use crate::server::handler::{self, BoxedHandler, Handler, Route};
use crate::server::HttpResponse;

/// An ordered route table with a not-found fallback.
///
/// Routes are matched by exact equality of method and path, in registration
/// order; the first match wins. Build the router once at start-up and share
/// it read-only afterwards.
pub struct Router {
    routes: Vec<Route>,
    not_found: BoxedHandler,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// An empty router whose fallback answers `404 Page not found`.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            not_found: Box::new(handler::not_found),
        }
    }

    /// Append a route. Duplicates are kept; the earlier one shadows the later.
    pub fn register<H>(&mut self, method: Method, path: impl Into<String>, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.routes.push(Route {
            method,
            path: path.into(),
            handler: Box::new(handler),
        });
        self
    }

    /// Append a `GET` route served by a closure.
    pub fn get<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
    {
        self.register(Method::GET, path, handler)
    }

    /// Append a `POST` route served by a closure.
    pub fn post<F>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static,
    {
        self.register(Method::POST, path, handler)
    }

    /// Replace the handler used when no route matches.
    pub fn fallback<H>(&mut self, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.not_found = Box::new(handler);
        self
    }

    /// The registered routes, in order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Dispatch on the request URI exactly as parsed, query included.
    pub fn dispatch(&self, request: &HttpRequest) -> HttpResponse {
        self.dispatch_path(request, &request.uri)
    }

    /// Dispatch on `path` instead of the request URI.
    ///
    /// Callers that want `/foo?x=1` to reach the `/foo` route pass
    /// [`HttpRequest::path`] here.
    pub fn dispatch_path(&self, request: &HttpRequest, path: &str) -> HttpResponse {
        match self.routes.iter().find(|route| route.matches(&request.method, path)) {
            Some(route) => {
                debug!("Matched route {} {}", route.method, route.path);
                route.handler.handle(request)
            }
            None => {
                debug!("No route for {} {path}, using fallback", request.method);
                self.not_found.handle(request)
            }
        }
    }
}
