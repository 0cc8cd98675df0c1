//! Text utilities.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::loader::{UnitError, UnitRouter};
use crate::state::SharedState;

/// Query of `GET /tools/echo`.
#[derive(Debug, Deserialize)]
pub struct EchoQuery {
    /// Text to repeat.
    #[serde(default)]
    pub text: Option<String>,
}

/// Query of `GET /tools/check-key`.
#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    /// Key to compare against the catalog's shared key.
    #[serde(default)]
    pub apikey: Option<String>,
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("parameter '{name}' is required"))),
    }
}

/// Registers `GET /tools/echo`.
///
/// # Errors
///
/// Never fails.
pub fn register_echo(router: UnitRouter) -> Result<UnitRouter, UnitError> {
    Ok(router.route("/tools/echo", get(echo)))
}

/// Registers `GET /tools/check-key`.
///
/// # Errors
///
/// Never fails.
pub fn register_check_key(router: UnitRouter) -> Result<UnitRouter, UnitError> {
    Ok(router.route("/tools/check-key", get(check_key)))
}

/// Repeat `text` back.
///
/// # Errors
///
/// Returns `400` if `text` is missing or blank.
pub async fn echo(Query(query): Query<EchoQuery>) -> Result<impl IntoResponse, ApiError> {
    let text = required(query.text, "text")?;
    Ok(Json(json!({
        "status": true,
        "result": text,
        "length": text.chars().count(),
    })))
}

/// Check `apikey` against the shared key.
///
/// # Errors
///
/// Returns `400` if `apikey` is missing and `401` if it does not match.
pub async fn check_key(
    State(state): State<SharedState>,
    Query(query): Query<KeyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let key = required(query.apikey, "apikey")?;
    if state.api_key().is_empty() || key != state.api_key() {
        return Err(ApiError::Unauthorized);
    }
    Ok(Json(json!({ "status": true, "result": "valid" })))
}
