//! Catalog-driven HTTP API gateway.
//!
//! This crate serves a set of independently implemented endpoints described
//! by a catalog document. It handles:
//!
//! - Loading the catalog (branding, links, category tree, shared API key)
//! - Selecting and registering route units from a directory tree
//! - Wrapping every JSON response in the `status`/`creator` envelope
//! - Serving the catalog UI, the settings document and fixed 404/500 pages
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Clients                            │
//! │              (browser UI / apidex explorer)                │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │                      apidex-gateway                        │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────────┐    │
//! │  │ Static files │ │  Envelope    │ │   Route units    │    │
//! │  │ / and /src   │ │  middleware  │ │ (info, tools, …) │    │
//! │  └──────────────┘ └──────────────┘ └──────────────────┘    │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                    ┌──────────────────┐
//!                    │ settings.json    │
//!                    │ (SettingsStore)  │
//!                    └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use apidex_core::SettingsStore;
//! use apidex_gateway::{create_router, units, GatewayConfig, GatewayState, RouteLoader};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GatewayConfig::default();
//! let settings = SettingsStore::load(&config.settings_path)?;
//! let selected = RouteLoader::discover(&config.routes_dir, units::builtin())?;
//!
//! let state = GatewayState::new(settings, config);
//! let app = create_router(state, selected)?;
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod envelope;
pub mod error;
pub mod loader;
pub mod pages;
pub mod routes;
pub mod state;
pub mod units;

pub use config::GatewayConfig;
pub use error::{ApiError, StartupError};
pub use loader::{RouteLoader, RouteUnit, UnitError, UnitRouter};
pub use routes::create_router;
pub use state::{GatewayState, RequestCounter, SharedState};
