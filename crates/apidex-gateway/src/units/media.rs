//! Binary responses.

use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::loader::{UnitError, UnitRouter};

/// A 1x1 transparent PNG.
pub const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

/// Registers `GET /media/pixel`.
///
/// # Errors
///
/// Never fails.
pub fn register_pixel(router: UnitRouter) -> Result<UnitRouter, UnitError> {
    Ok(router.route("/media/pixel", get(pixel)))
}

/// Serve [`PIXEL_PNG`].
pub async fn pixel() -> impl IntoResponse {
    ([(CONTENT_TYPE, "image/png")], PIXEL_PNG)
}
