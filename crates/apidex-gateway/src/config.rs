//! Gateway configuration types.
//!
//! This module defines the configuration for the HTTP gateway. Values come
//! from environment variables, with defaults matching the bundled `site/`
//! layout.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8080").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Path of the catalog settings document.
    #[serde(default = "GatewayConfig::default_settings_path")]
    pub settings_path: PathBuf,

    /// Directory holding the catalog UI entry page and error pages.
    #[serde(default = "GatewayConfig::default_ui_dir")]
    pub ui_dir: PathBuf,

    /// Directory served under `/src`.
    #[serde(default = "GatewayConfig::default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Root of the `<category>/<unit>.unit` tree selecting route units.
    #[serde(default = "GatewayConfig::default_routes_dir")]
    pub routes_dir: PathBuf,

    /// Allowed CORS origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Spaces of indentation in enveloped JSON bodies (0 for compact).
    #[serde(default = "GatewayConfig::default_json_indent")]
    pub json_indent: usize,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    fn default_settings_path() -> PathBuf {
        PathBuf::from("site/src/settings.json")
    }

    fn default_ui_dir() -> PathBuf {
        PathBuf::from("site/api-page")
    }

    fn default_assets_dir() -> PathBuf {
        PathBuf::from("site/src")
    }

    fn default_routes_dir() -> PathBuf {
        PathBuf::from("site/routes")
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    const fn default_json_indent() -> usize {
        2
    }

    /// Build a configuration from environment variables.
    ///
    /// Recognised: `LISTEN_ADDR`, `SETTINGS_PATH`, `UI_DIR`, `ASSETS_DIR`,
    /// `ROUTES_DIR`, `CORS_ORIGINS` (comma separated), `MAX_BODY_BYTES`,
    /// `REQUEST_TIMEOUT_SECONDS`, `JSON_INDENT`. Unset or unparsable values
    /// keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("LISTEN_ADDR") {
            config.listen_addr = v;
        }
        if let Some(v) = lookup("SETTINGS_PATH") {
            config.settings_path = v.into();
        }
        if let Some(v) = lookup("UI_DIR") {
            config.ui_dir = v.into();
        }
        if let Some(v) = lookup("ASSETS_DIR") {
            config.assets_dir = v.into();
        }
        if let Some(v) = lookup("ROUTES_DIR") {
            config.routes_dir = v.into();
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            config.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = lookup("MAX_BODY_BYTES").and_then(|v| v.parse().ok()) {
            config.max_body_bytes = v;
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            config.request_timeout_seconds = v;
        }
        if let Some(v) = lookup("JSON_INDENT").and_then(|v| v.parse().ok()) {
            config.json_indent = v;
        }

        config
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            settings_path: Self::default_settings_path(),
            ui_dir: Self::default_ui_dir(),
            assets_dir: Self::default_assets_dir(),
            routes_dir: Self::default_routes_dir(),
            cors_origins: vec!["*".to_string()],
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
            json_indent: Self::default_json_indent(),
        }
    }
}
