//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use log::{debug, error, info, warn};

use crate::parser::lines::find_header_end;
use crate::parser::{Error as ParserError, HttpRequest, HttpVersion, RequestParser};
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};
use crate::server::router::Router;

/// An HTTP server.
///
/// Owns the configuration and a read-only [`Router`] shared by all
/// connection tasks. Each connection carries exactly one request.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The route table, fixed once the server is built.
    pub router: Arc<Router>,
    parser: Arc<RequestParser>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and routes.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let parser = Arc::new(RequestParser::new(config.limits.clone()));
        Self {
            config,
            router: Arc::new(router),
            parser,
        }
    }

    /// Build the response for a parsed request.
    ///
    /// The query component is stripped before routing, and an HTTP/1.0
    /// request gets an HTTP/1.0 status line back.
    pub fn respond(router: &Router, request: &HttpRequest) -> HttpResponse {
        let response = router.dispatch_path(request, request.path());
        match request.http_version() {
            Some(HttpVersion::Http10) => response.with_version(HttpVersion::Http10),
            _ => response,
        }
    }

    /// Run one complete in-memory request through parse, dispatch and build.
    ///
    /// Malformed requests become `400 Bad Request`. Only an incomplete head
    /// is returned as an error, so the caller can wait for more bytes.
    pub fn process(router: &Router, parser: &RequestParser, raw: &[u8]) -> Result<HttpResponse, ParserError> {
        let request = match parser.parse(raw) {
            Ok(request) => request,
            Err(ParserError::Incomplete) => return Err(ParserError::Incomplete),
            Err(err) => {
                warn!("Rejecting malformed request: {err}");
                return Ok(HttpResponse::bad_request());
            }
        };

        let request = match find_header_end(raw) {
            Some(end) => {
                let available = &raw[end.body_start..];
                let wanted = request.content_length().unwrap_or(0);
                let body = available[..wanted.min(available.len())].to_vec();
                request.attach_body(body)
            }
            None => request,
        };

        Ok(Self::respond(router, &request))
    }

    /// Log the registered endpoints.
    fn display_server_info(&self) {
        info!("Document root: {}", self.config.document_root.display());
        info!("Registered endpoints:");
        for route in self.router.routes() {
            info!("  {} {}", route.method, route.path);
        }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        })
    }

    /// Hand an accepted connection to its own task, or answer 503 when saturated.
    async fn handle_new_connection(&self, mut socket: TcpStream, addr: SocketAddr, semaphore: &Arc<Semaphore>, tasks: &mut JoinSet<()>) {
        let permit = match semaphore.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::service_unavailable();
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        debug!("Accepted connection from {addr}");
        let router = self.router.clone();
        let parser = self.parser.clone();
        let read_buffer_size = self.config.read_buffer_size;

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            if let Err(e) = Self::handle_connection(&mut socket, &router, &parser, read_buffer_size).await {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Handle connection errors. Returns true when the accept loop should stop.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        }).await;

        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    pub async fn start(&self) -> Result<(), Error> {
        self.config.validate()?;
        self.display_server_info();

        let listener = self.setup_listener().await?;

        // Create a semaphore to limit concurrent connections
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();
        // Keep a sender alive so a failed Ctrl+C handler does not close the channel
        let ctrl_c = Self::setup_ctrl_c_handler(shutdown_tx.clone());

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            self.handle_new_connection(socket, addr, &semaphore, &mut tasks).await;
                        },
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        ctrl_c.abort();
        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read one request from `socket`.
    ///
    /// Reads until the head is complete and any `Content-Length` body has
    /// arrived or the peer stops sending. Returns `Ok(None)` when the peer
    /// closes before sending anything.
    async fn read_request(
        socket: &mut (impl AsyncRead + Unpin),
        parser: &RequestParser,
        read_buffer_size: usize,
    ) -> Result<Option<HttpRequest>, Error> {
        let mut buf = Vec::with_capacity(read_buffer_size);
        let mut chunk = vec![0; read_buffer_size];

        let request = loop {
            let n = socket.read(&mut chunk[..read_buffer_size - buf.len()]).await?;
            if n == 0 {
                if buf.is_empty() {
                    return Ok(None);
                }
                return Err(ParserError::Incomplete.into());
            }
            buf.extend_from_slice(&chunk[..n]);

            match parser.parse(&buf) {
                Ok(request) => break request,
                Err(ParserError::Incomplete) if buf.len() < read_buffer_size => continue,
                Err(ParserError::Incomplete) => return Err(Error::RequestTooLarge(read_buffer_size)),
                Err(err) => return Err(err.into()),
            }
        };

        let body_start = find_header_end(&buf).map_or(buf.len(), |end| end.body_start);
        let body_end = body_start
            .checked_add(request.content_length().unwrap_or(0))
            .filter(|&end| end <= read_buffer_size)
            .ok_or(Error::RequestTooLarge(read_buffer_size))?;

        while buf.len() < body_end {
            let n = socket.read(&mut chunk[..read_buffer_size - buf.len()]).await?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let body = buf[body_start..buf.len().min(body_end)].to_vec();
        Ok(Some(request.attach_body(body)))
    }

    /// Handle a single connection: read one request, dispatch it, write the response.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router,
        parser: &RequestParser,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let request = match Self::read_request(socket, parser, read_buffer_size).await {
            Ok(Some(request)) => request,
            Ok(None) => return Ok(()), // Connection closed
            Err(Error::RequestTooLarge(size)) => {
                let response = HttpResponse::text(StatusCode::PAYLOAD_TOO_LARGE, "Request too large");
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::RequestTooLarge(size));
            }
            Err(Error::ParseError(e)) => {
                socket.write_all(&HttpResponse::bad_request().to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
            Err(e) => return Err(e),
        };

        info!("{} {} {}", request.method, request.uri, request.version);
        let response = Self::respond(router, &request);
        debug!("Responding {} with {} body bytes", response.status, response.body_len());

        socket.write_all(&response.to_bytes()).await?;
        socket.flush().await?;
        Ok(())
    }
}
