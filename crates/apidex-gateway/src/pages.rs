//! Fixed HTML pages and the server-error boundary.
//!
//! The entry page and the 404/500 pages are read once from the UI directory
//! at startup. Missing files fall back to small built-in pages.

use std::any::Any;
use std::path::Path;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

use crate::state::SharedState;

const BUILTIN_INDEX: &str = "<!doctype html>\n<html><head><title>apidex</title></head>\
<body><h1>apidex</h1><p>The catalog is served at <a href=\"/src/settings.json\">/src/settings.json</a>.</p></body></html>\n";

const BUILTIN_NOT_FOUND: &str = "<!doctype html>\n<html><head><title>404 Not Found</title></head>\
<body><h1>404</h1><p>The page you requested does not exist.</p></body></html>\n";

const BUILTIN_SERVER_ERROR: &str = "<!doctype html>\n<html><head><title>500 Internal Server Error</title></head>\
<body><h1>500</h1><p>Something went wrong on our side.</p></body></html>\n";

/// Response extension marking a failure that must be shown as the 500 page.
#[derive(Debug, Clone, Copy)]
pub struct ServerFailure;

impl ServerFailure {
    /// A bare 500 response carrying the marker.
    #[must_use]
    pub fn response() -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(Self);
        response
    }
}

/// The fixed pages served by the gateway.
#[derive(Debug, Clone)]
pub struct Pages {
    index: String,
    not_found: String,
    server_error: String,
}

impl Pages {
    /// Read `index.html`, `404.html` and `500.html` from `ui_dir`.
    #[must_use]
    pub fn load(ui_dir: &Path) -> Self {
        Self {
            index: read_page(ui_dir, "index.html", BUILTIN_INDEX),
            not_found: read_page(ui_dir, "404.html", BUILTIN_NOT_FOUND),
            server_error: read_page(ui_dir, "500.html", BUILTIN_SERVER_ERROR),
        }
    }

    /// The catalog UI entry page.
    #[must_use]
    pub fn index(&self) -> Response {
        Html(self.index.clone()).into_response()
    }

    /// The 404 page.
    #[must_use]
    pub fn not_found(&self) -> Response {
        (StatusCode::NOT_FOUND, Html(self.not_found.clone())).into_response()
    }

    /// The 500 page.
    #[must_use]
    pub fn server_error(&self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Html(self.server_error.clone())).into_response()
    }
}

impl Default for Pages {
    fn default() -> Self {
        Self {
            index: BUILTIN_INDEX.to_string(),
            not_found: BUILTIN_NOT_FOUND.to_string(),
            server_error: BUILTIN_SERVER_ERROR.to_string(),
        }
    }
}

fn read_page(dir: &Path, file: &str, fallback: &str) -> String {
    let path = dir.join(file);
    match std::fs::read_to_string(&path) {
        Ok(page) => page,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Using built-in page");
            fallback.to_string()
        }
    }
}

/// `GET /`.
pub async fn index(State(state): State<SharedState>) -> Response {
    state.pages.index()
}

/// Fallback for unmatched paths.
pub async fn not_found(State(state): State<SharedState>) -> Response {
    state.pages.not_found()
}

/// Replace any response marked with [`ServerFailure`] by the 500 page.
///
/// A path served only for other methods counts as unmatched and gets the
/// 404 page.
pub async fn error_boundary(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if response.extensions().get::<ServerFailure>().is_some() {
        return state.pages.server_error();
    }
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return state.pages.not_found();
    }
    response
}

/// Turn a handler panic into a marked 500 response.
///
/// The panic payload is logged; it never reaches the client.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(error = %detail, "Handler panicked");
    ServerFailure::response()
}
