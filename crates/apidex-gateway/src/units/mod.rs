//! Built-in route units.
//!
//! Each unit attaches its handlers under a path of its own choosing. The
//! handlers are deliberately small; they exist to give the catalog
//! something real to invoke.

pub mod info;
pub mod media;
pub mod tools;

use crate::loader::RouteUnit;

static BUILTIN: [RouteUnit; 4] = [
    RouteUnit::new("info", "status", info::register_status),
    RouteUnit::new("media", "pixel", media::register_pixel),
    RouteUnit::new("tools", "check-key", tools::register_check_key),
    RouteUnit::new("tools", "echo", tools::register_echo),
];

/// Every unit compiled into the gateway.
#[must_use]
pub fn builtin() -> &'static [RouteUnit] {
    &BUILTIN
}
