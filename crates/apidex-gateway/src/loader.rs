//! Route unit discovery and registration.
//!
//! A route unit is a self-contained piece of code that attaches one or more
//! handlers to the router. The gateway ships its units as a compile-time
//! list (see [`crate::units::builtin`]); the routes directory decides which
//! of them are mounted:
//!
//! ```text
//! <routes_dir>/
//! ├── info/
//! │   └── status.unit      -> unit "info/status"
//! └── tools/
//!     ├── echo.unit        -> unit "tools/echo"
//!     └── check-key.unit   -> unit "tools/check-key"
//! ```
//!
//! Registration is sequential, happens before the listener is bound, and is
//! fail-fast: the first unit that errors aborts startup.

use std::fs;
use std::path::{Path, PathBuf};

use axum::Router;
use thiserror::Error;

use crate::error::StartupError;
use crate::state::SharedState;

/// File extension marking a unit in the routes directory.
pub const UNIT_EXTENSION: &str = "unit";

/// The router type units register against.
pub type UnitRouter = Router<SharedState>;

/// Registration function of a unit.
pub type Registrar = fn(UnitRouter) -> Result<UnitRouter, UnitError>;

/// A unit's own registration failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UnitError(pub String);

/// A route registration unit.
#[derive(Debug, Clone, Copy)]
pub struct RouteUnit {
    /// Category the unit belongs to.
    pub category: &'static str,
    /// Unit name, unique within its category.
    pub name: &'static str,
    /// Attaches the unit's handlers.
    pub register: Registrar,
}

impl RouteUnit {
    /// Create a unit.
    #[must_use]
    pub const fn new(category: &'static str, name: &'static str, register: Registrar) -> Self {
        Self {
            category,
            name,
            register,
        }
    }

    /// `category/name`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

/// Walks the routes directory and applies units to a router.
pub struct RouteLoader;

impl RouteLoader {
    /// Select units from `available` according to the tree under `root`.
    ///
    /// Categories and files are visited in name order. A missing `root`
    /// selects nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Discovery`] if a directory cannot be read and
    /// [`StartupError::UnknownUnit`] if a unit file has no matching unit.
    pub fn discover<'a>(
        root: &Path,
        available: &'a [RouteUnit],
    ) -> Result<Vec<&'a RouteUnit>, StartupError> {
        if !root.is_dir() {
            tracing::warn!(path = %root.display(), "Routes directory not found, no units selected");
            return Ok(Vec::new());
        }

        let mut selected = Vec::new();
        for category_dir in sorted_entries(root)? {
            if !category_dir.is_dir() {
                continue;
            }
            let category = file_name(&category_dir);

            for file in sorted_entries(&category_dir)? {
                if !file.is_file()
                    || file.extension().and_then(|e| e.to_str()) != Some(UNIT_EXTENSION)
                {
                    continue;
                }
                let name = file
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();

                let unit = available
                    .iter()
                    .find(|u| u.category == category && u.name == name)
                    .ok_or_else(|| StartupError::UnknownUnit {
                        category: category.clone(),
                        name: name.clone(),
                    })?;
                selected.push(unit);
            }
        }

        Ok(selected)
    }

    /// Register each unit in order.
    ///
    /// Returns the router and the number of units loaded.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::Unit`] for the first unit that fails.
    pub fn load<'a, I>(mut router: UnitRouter, units: I) -> Result<(UnitRouter, usize), StartupError>
    where
        I: IntoIterator<Item = &'a RouteUnit>,
    {
        let mut loaded = 0;
        for unit in units {
            router = (unit.register)(router).map_err(|source| StartupError::Unit {
                unit: unit.id(),
                source,
            })?;
            loaded += 1;
            tracing::info!(unit = %unit.id(), "Loaded route unit");
        }

        tracing::info!(total = loaded, "Route loading complete");
        Ok((router, loaded))
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, StartupError> {
    let read = |dir: &Path| -> std::io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    };
    read(dir).map_err(|source| StartupError::Discovery {
        path: dir.to_path_buf(),
        source,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
