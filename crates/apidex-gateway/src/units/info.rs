//! Service information.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::loader::{UnitError, UnitRouter};
use crate::state::SharedState;

/// Payload of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `true`.
    pub status: bool,
    /// Service details.
    pub result: StatusDetails,
}

/// Service details.
#[derive(Debug, Serialize)]
pub struct StatusDetails {
    /// Requests observed since startup, including this one.
    pub total_requests: u64,
    /// Seconds since startup.
    pub uptime_seconds: i64,
    /// Gateway version.
    pub version: &'static str,
}

/// Registers `GET /api/status`.
///
/// # Errors
///
/// Never fails.
pub fn register_status(router: UnitRouter) -> Result<UnitRouter, UnitError> {
    Ok(router.route("/api/status", get(status)))
}

/// Report request count, uptime and version.
///
/// ```text
/// GET /api/status
///
/// Response: 200 OK
/// {
///   "status": true,
///   "creator": "...",
///   "result": { "total_requests": 12, "uptime_seconds": 30, "version": "0.1.0" }
/// }
/// ```
pub async fn status(State(state): State<SharedState>) -> impl IntoResponse {
    let uptime = Utc::now().signed_duration_since(state.started_at);

    Json(StatusResponse {
        status: true,
        result: StatusDetails {
            total_requests: state.requests.get(),
            uptime_seconds: uptime.num_seconds(),
            version: env!("CARGO_PKG_VERSION"),
        },
    })
}
