//! Gateway application state.
//!
//! This module defines the context shared by every request handler. It is
//! built once at startup and dropped at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use apidex_core::SettingsStore;

use crate::config::GatewayConfig;
use crate::pages::Pages;

/// State as handed to axum.
pub type SharedState = Arc<GatewayState>;

/// Count of inbound requests observed by this process.
///
/// Advisory only; nothing depends on its exact value.
#[derive(Debug, Default)]
pub struct RequestCounter(AtomicU64);

impl RequestCounter {
    /// Record one request and return the new total.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current total.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Shared application state for the gateway.
#[derive(Debug)]
pub struct GatewayState {
    /// The loaded catalog.
    pub settings: SettingsStore,
    /// Gateway configuration.
    pub config: GatewayConfig,
    /// Fixed HTML pages.
    pub pages: Pages,
    /// Requests observed so far.
    pub requests: RequestCounter,
    /// When this state was created.
    pub started_at: DateTime<Utc>,
}

impl GatewayState {
    /// Create the state, reading the fixed pages from `config.ui_dir`.
    #[must_use]
    pub fn new(settings: SettingsStore, config: GatewayConfig) -> Self {
        let pages = Pages::load(&config.ui_dir);
        Self {
            settings,
            config,
            pages,
            requests: RequestCounter::default(),
            started_at: Utc::now(),
        }
    }

    /// Shared API key from the catalog, for handlers that check one.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.settings.api_key()
    }

    /// Creator name stamped into response envelopes.
    #[must_use]
    pub fn creator(&self) -> &str {
        self.settings.creator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_increments() {
        let counter = RequestCounter::default();
        assert_eq!(counter.get(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.get(), 2);
    }
}
