//! Response envelope middleware.
//!
//! Every JSON object a route unit sends is rewritten so that its first keys
//! are `status` (when the handler supplied one) and `creator`, followed by
//! the handler's remaining fields in their original order. Non-object JSON
//! keeps its shape but is re-indented like everything else; non-JSON bodies
//! pass through untouched.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::pages::ServerFailure;
use crate::state::SharedState;

/// Wrap a handler payload with the envelope fields.
///
/// `status` is carried over from the payload if present; `creator` is always
/// the configured name.
#[must_use]
pub fn wrap_payload(payload: Value, creator: &str) -> Value {
    let Value::Object(fields) = payload else {
        return payload;
    };

    let mut wrapped = Map::with_capacity(fields.len() + 2);
    if let Some(status) = fields.get("status") {
        wrapped.insert("status".to_string(), status.clone());
    }
    wrapped.insert("creator".to_string(), Value::String(creator.to_string()));
    for (key, value) in fields {
        if key != "status" && key != "creator" {
            wrapped.insert(key, value);
        }
    }
    Value::Object(wrapped)
}

/// Serialize with `indent` spaces per level, or compactly when `indent` is 0.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(value: &Value, indent: usize) -> Result<Vec<u8>, serde_json::Error> {
    if indent == 0 {
        return serde_json::to_vec(value);
    }
    let indent = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut serializer)?;
    Ok(out)
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// Middleware applying [`wrap_payload`] to JSON responses.
pub async fn envelope(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if !is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "Failed to buffer response body");
            return ServerFailure::response();
        }
    };

    let Ok(payload) = serde_json::from_slice::<Value>(&bytes) else {
        return Response::from_parts(parts, Body::from(bytes));
    };

    let wrapped = wrap_payload(payload, state.creator());
    match render_json(&wrapped, state.config.json_indent) {
        Ok(body) => {
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(body))
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize envelope");
            Response::from_parts(parts, Body::from(bytes))
        }
    }
}
