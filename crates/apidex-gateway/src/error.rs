//! Gateway error types.
//!
//! [`ApiError`] is what handlers return; [`StartupError`] covers everything
//! that can abort the process before it starts serving.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use apidex_core::CoreError;

use crate::loader::UnitError;
use crate::pages::ServerFailure;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or wrong API key.
    #[error("invalid api key")]
    Unauthorized,

    /// The requested resource was not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Internal server error. Logged and shown as the 500 page.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Error body, in the same shape handlers use for their own failures.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: bool,
    error: String,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(error = %detail, "Handler failed");
            return ServerFailure::response();
        }

        let body = ErrorBody {
            status: false,
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Errors that abort gateway startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The catalog document could not be loaded.
    #[error("failed to load settings: {0}")]
    Settings(#[from] CoreError),

    /// The routes directory could not be walked.
    #[error("failed to scan {path}: {source}")]
    Discovery {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A unit file names a unit the gateway does not provide.
    #[error("unknown route unit {category}/{name}")]
    UnknownUnit {
        /// Category directory name.
        category: String,
        /// Unit file stem.
        name: String,
    },

    /// A unit failed while registering its routes.
    #[error("route unit {unit} failed to register: {source}")]
    Unit {
        /// `category/name` of the failing unit.
        unit: String,
        /// The unit's error.
        #[source]
        source: UnitError,
    },

    /// Binding or serving failed.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
