//! Tableau engine crate.
//!
//! This crate owns the scene-agnostic runtime pieces used by concrete scenes:
//! frame timing, the ticker that drives active scenes, the render-surface
//! contract, and the scene lifecycle itself.

pub mod coords;
pub mod logging;
pub mod scene;
pub mod surface;
pub mod time;
