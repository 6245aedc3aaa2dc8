//! Scene lifecycle contract.
//!
//! A scene is an independently activatable unit of presentation. Every scene
//! walks the same state machine:
//!
//! ```text
//! Uninitialized ──init──▶ Active ◀──init── Inactive
//!                           │                 ▲
//!                           └────clean_up─────┘
//! any ──destroy──▶ Destroyed (terminal)
//! ```
//!
//! Scenes implement [`Scene`] and compose a [`Lifecycle`] for the shared
//! bookkeeping (state tracking and ticker registration). The
//! [`SceneDirector`] owns scenes and decides which one is current.

mod director;
mod error;
mod lifecycle;

pub use director::SceneDirector;
pub use error::SceneError;
pub use lifecycle::{Lifecycle, Scene, SceneCtx, SceneId, SceneState};
