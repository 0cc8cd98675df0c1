//! Router composition.
//!
//! This module assembles the full gateway: static UI and settings serving,
//! the loaded route units behind the response envelope, fallback pages and
//! the middleware stack.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::handler::Handler;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::envelope::envelope;
use crate::error::StartupError;
use crate::loader::{RouteLoader, RouteUnit};
use crate::pages::{error_boundary, handle_panic, index, not_found};
use crate::state::{GatewayState, SharedState};

/// Create the gateway router.
///
/// # Routes
///
/// - `GET /` - catalog UI entry page
/// - `GET /src/*` - settings document and shared assets
/// - every path registered by `units`, wrapped in the response envelope
/// - any other path - files from the UI directory, else the 404 page
///
/// # Errors
///
/// Returns [`StartupError::Unit`] if a unit fails to register.
pub fn create_router<'a, I>(state: GatewayState, units: I) -> Result<Router, StartupError>
where
    I: IntoIterator<Item = &'a RouteUnit>,
{
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout = state.config.request_timeout();
    let ui_dir = state.config.ui_dir.clone();
    let assets_dir = state.config.assets_dir.clone();

    let state = Arc::new(state);

    let (units_router, _loaded) = RouteLoader::load(Router::new(), units)?;
    let units_router =
        units_router.layer(middleware::from_fn_with_state(Arc::clone(&state), envelope));

    let missing = not_found.with_state(Arc::clone(&state));
    let assets = ServeDir::new(assets_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(missing.clone());
    let ui = ServeDir::new(ui_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(missing);

    let router = Router::new()
        .route("/", get(index))
        .nest_service("/src", assets)
        .merge(units_router)
        .fallback_service(ui)
        // Middleware
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            error_boundary,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&cors_origins))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            count_requests,
        ))
        .with_state(state);

    Ok(router)
}

/// Count and log every inbound request.
async fn count_requests(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let total = state.requests.increment();
    tracing::info!(path = %request.uri().path(), total, "Request route");
    next.run(request).await
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
