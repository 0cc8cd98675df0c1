//! The catalog document and its store.
//!
//! The catalog is a JSON document describing branding, external links and
//! the category tree of invocable endpoints. It is loaded once at startup
//! and never mutated afterwards.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Creator name used when the document leaves it blank.
pub const DEFAULT_CREATOR: &str = "Created Using Apidex";

/// The full settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    /// Display name of the API collection.
    #[serde(default)]
    pub name: Option<String>,
    /// Version label.
    #[serde(default)]
    pub version: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Server-side settings shared with handlers.
    #[serde(default)]
    pub api_settings: ApiSettings,
    /// Header badge settings.
    #[serde(default)]
    pub header: HeaderSettings,
    /// External links, in display order.
    #[serde(default)]
    pub links: Vec<Link>,
    /// Endpoint categories, in display order.
    pub categories: Vec<Category>,
}

/// `apiSettings` block of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Name stamped into every JSON response envelope.
    #[serde(default)]
    pub creator: String,
    /// Shared key made available to handlers.
    #[serde(default)]
    pub apikey: String,
}

/// `header` block of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSettings {
    /// Status badge text.
    #[serde(default)]
    pub status: Option<String>,
}

/// An external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub url: String,
    /// Link text.
    pub name: String,
}

/// A named group of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category heading.
    pub name: String,
    /// Items in document order.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// One invocable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub desc: String,
    /// Request path, optionally with a query string declaring parameters.
    pub path: String,
    /// Longer help text shown under the parameter form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_desc: Option<String>,
}

impl CatalogDocument {
    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] if the text is not a valid catalog.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Creator name for response envelopes, with the built-in fallback.
    #[must_use]
    pub fn creator(&self) -> &str {
        let creator = self.api_settings.creator.trim();
        if creator.is_empty() {
            DEFAULT_CREATOR
        } else {
            creator
        }
    }

    /// Iterate over every item in every category.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

/// Read-only holder of the loaded catalog.
///
/// Cloning is cheap; all clones share the same document.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    document: Arc<CatalogDocument>,
}

impl SettingsStore {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = CatalogDocument::from_json(&text)?;

        tracing::debug!(
            path = %path.display(),
            categories = document.categories.len(),
            items = document.items().count(),
            "Catalog loaded"
        );

        Ok(Self::new(document))
    }

    /// Wrap an already-parsed document.
    #[must_use]
    pub fn new(document: CatalogDocument) -> Self {
        Self {
            document: Arc::new(document),
        }
    }

    /// The loaded document.
    #[must_use]
    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }

    /// Creator name for response envelopes.
    #[must_use]
    pub fn creator(&self) -> &str {
        self.document.creator()
    }

    /// Shared API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.document.api_settings.apikey
    }
}
