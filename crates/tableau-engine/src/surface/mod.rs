//! Render-surface contract.
//!
//! Scenes never draw directly. They create visuals and groups through a
//! [`RenderSurface`], position them, and move visuals between groups. A group
//! is a positioned container; a visual's position is local to the group it is
//! attached to, and a detached visual is not presented at all.
//!
//! Responsibilities:
//! - define opaque handles ([`VisualHandle`], [`GroupHandle`])
//! - describe what a visual looks like ([`VisualSpec`]) without any backend types
//! - provide [`HeadlessSurface`], an in-memory implementation for tests and tools
//! - provide [`VisualArena`], the per-scene ownership list of created visuals

mod arena;
mod headless;
mod visual;
mod z_index;

pub use arena::VisualArena;
pub use headless::HeadlessSurface;
pub use visual::{GroupHandle, VisualHandle, VisualKind, VisualSpec};
pub use z_index::ZIndex;

use crate::coords::Vec2;

/// Operations a scene needs from whatever actually renders it.
///
/// Calls with released or unknown handles are ignored by implementations;
/// they must never panic.
pub trait RenderSurface {
    /// Creates an empty group positioned at the stage origin.
    fn create_group(&mut self) -> GroupHandle;

    /// Frees a group. Visuals still attached become detached, not released.
    fn release_group(&mut self, group: GroupHandle);

    /// Moves a group; attached visuals follow.
    fn set_group_position(&mut self, group: GroupHandle, pos: Vec2);

    /// Creates a detached visual.
    fn create_visual(&mut self, spec: &VisualSpec) -> VisualHandle;

    /// Irreversibly frees a visual. The handle is dead afterwards.
    fn release_visual(&mut self, handle: VisualHandle);

    /// Re-parents a visual to `group`, appending it on top of that group's
    /// insertion order. A visual belongs to at most one group.
    fn attach(&mut self, handle: VisualHandle, group: GroupHandle);

    /// Removes a visual from its group without releasing it.
    fn detach(&mut self, handle: VisualHandle);

    /// Sets the position relative to the visual's current group.
    fn set_position(&mut self, handle: VisualHandle, pos: Vec2);

    fn set_z_index(&mut self, handle: VisualHandle, z: ZIndex);

    /// Replaces the text of a label visual. No-op for other kinds.
    fn set_text(&mut self, handle: VisualHandle, text: &str);

    /// Converts `local`, expressed in `group` space, into stage space.
    fn resolve_world_position(&self, group: GroupHandle, local: Vec2) -> Vec2;
}
