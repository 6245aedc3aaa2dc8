//! Coordinate and geometry types shared by the surface and scenes.
//!
//! Canonical stage space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Surfaces resolve group-local offsets into this space.

mod color;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use vec2::Vec2;
pub use viewport::Viewport;
