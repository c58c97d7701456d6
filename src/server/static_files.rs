//! Static file serving from a sandboxed document root.
//!
//! The pipeline is: [`resolve_path`] checks the URI and joins it to the
//! document root, [`load_file`] stats and reads the file, [`mime_type_for`]
//! picks a content type. [`StaticFiles`] wraps all three as a [`Handler`].

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use log::{debug, error, warn};

use crate::parser::HttpRequest;
use crate::server::error::StaticFileError;
use crate::server::handler::Handler;
use crate::server::{HttpResponse, StatusCode};

/// Document served for `/`.
pub const DEFAULT_DOCUMENT: &str = "/index.html";

/// Cache policy attached to every static file.
pub const CACHE_CONTROL: &str = "public, max-age=3600";

/// MIME type for unknown extensions.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

static MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("txt", "text/plain"),
    ("pdf", "application/pdf"),
];

/// Content type for `path`, by case-insensitive extension match.
pub fn mime_type_for(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT_MIME_TYPE;
    };

    MIME_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(DEFAULT_MIME_TYPE, |&(_, mime)| mime)
}

/// Whether `uri` passes the traversal check.
///
/// The check is textual: any `..` or `//`, also in their `%2e` / `%2f`
/// encoded forms, is rejected, as is a URI that does not start with `/`.
/// A benign file name containing `..` is rejected too.
pub fn is_safe_path(uri: &str) -> bool {
    if !uri.starts_with('/') {
        return false;
    }

    let decoded = uri
        .replace("%2e", ".")
        .replace("%2E", ".")
        .replace("%2f", "/")
        .replace("%2F", "/");
    !decoded.contains("..") && !decoded.contains("//")
}

/// Join `uri` to `root`, mapping `/` to [`DEFAULT_DOCUMENT`].
///
/// The join is plain concatenation, so `root` should not end with a slash.
pub fn resolve_path(root: &Path, uri: &str) -> Result<PathBuf, StaticFileError> {
    if !is_safe_path(uri) {
        return Err(StaticFileError::PathRejected(uri.to_string()));
    }

    let file_path = if uri == "/" { DEFAULT_DOCUMENT } else { uri };
    let mut full = OsString::from(root.as_os_str());
    full.push(file_path);
    Ok(PathBuf::from(full))
}

/// Read a regular file into a buffer sized to its reported length.
pub fn load_file(path: &Path) -> Result<Vec<u8>, StaticFileError> {
    let not_found = || StaticFileError::NotFound(path.to_path_buf());

    let metadata = fs::metadata(path).map_err(|_| not_found())?;
    if !metadata.is_file() {
        return Err(not_found());
    }

    let mut file = File::open(path).map_err(|_| not_found())?;
    let size = usize::try_from(metadata.len()).map_err(|_| not_found())?;

    let mut content = vec![0; size];
    file.read_exact(&mut content)
        .map_err(|source| StaticFileError::ReadError { path: path.to_path_buf(), source })?;

    Ok(content)
}

/// Resolve `uri` under `root`, read the file and derive its MIME type.
pub fn resolve_and_load(root: &Path, uri: &str) -> Result<(Vec<u8>, &'static str), StaticFileError> {
    let path = resolve_path(root, uri)?;
    let content = load_file(&path)?;
    Ok((content, mime_type_for(&path)))
}

/// Serves files below a document root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build the response for `uri`, query component excluded.
    pub fn serve(&self, uri: &str) -> HttpResponse {
        match resolve_and_load(&self.root, uri) {
            Ok((content, mime_type)) => HttpResponse::new(StatusCode::OK)
                .with_content_type(mime_type)
                .with_header("Cache-Control", CACHE_CONTROL)
                .with_body_bytes(content),
            Err(err) => {
                match &err {
                    StaticFileError::PathRejected(_) => warn!("{err}"),
                    StaticFileError::NotFound(_) => debug!("{err}"),
                    StaticFileError::ReadError { .. } => error!("{err}"),
                }
                error_response(&err)
            }
        }
    }
}

impl Handler for StaticFiles {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        self.serve(request.path())
    }
}

/// The response a client sees for a static file failure.
pub fn error_response(err: &StaticFileError) -> HttpResponse {
    match err {
        StaticFileError::PathRejected(_) | StaticFileError::NotFound(_) => {
            HttpResponse::text(StatusCode::NOT_FOUND, "File not found")
        }
        StaticFileError::ReadError { .. } => HttpResponse::internal_error(),
    }
}
