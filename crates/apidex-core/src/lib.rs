//! Core types and view models for apidex.
//!
//! This crate provides the pieces shared by the gateway and the explorer:
//!
//! - **Catalog**: the declarative settings document and its read-only store
//! - **Path templates**: query-parameter names declared by an item's `path`
//! - **Views**: the category-grouped directory, live search filtering and
//!   the parameter form used to invoke an endpoint
//!
//! # Example
//!
//! ```
//! use apidex_core::{CatalogDocument, CatalogView};
//!
//! let doc: CatalogDocument = serde_json::from_str(r#"{
//!     "name": "FR3 UI",
//!     "categories": [{
//!         "name": "Tools",
//!         "items": [
//!             {"name": "B Item", "desc": "d", "path": "/b"},
//!             {"name": "A Item", "desc": "d", "path": "/a"}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let view = CatalogView::render(&doc);
//! let names: Vec<_> = view.sections[0].cards.iter().map(|c| c.item.name.as_str()).collect();
//! assert_eq!(names, ["A Item", "B Item"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod form;
pub mod search;
pub mod template;
pub mod view;

pub use catalog::{ApiSettings, CatalogDocument, Category, HeaderSettings, Item, Link, SettingsStore};
pub use error::{CoreError, Result};
pub use form::{FormError, ParamField, ParamForm, SubmitState};
pub use search::SearchFilter;
pub use template::PathTemplate;
pub use view::{Branding, CardSpacing, CardView, CatalogView, Invocation, LinkView, SectionView};
