use slotmap::SlotMap;

use crate::coords::Vec2;

use super::{GroupHandle, RenderSurface, VisualHandle, VisualKind, VisualSpec, ZIndex};

#[derive(Debug)]
struct Node {
    spec: VisualSpec,
    parent: Option<GroupHandle>,
    position: Vec2,
    z: ZIndex,
}

#[derive(Debug, Default)]
struct Group {
    position: Vec2,
    /// Insertion order; the last entry is the visual top of the group.
    children: Vec<VisualHandle>,
}

/// In-memory render surface.
///
/// Records the scene graph a real backend would draw: which visual sits in
/// which group, where, at what z-index. Nothing is rasterized.
///
/// Groups are flat (no nesting) and untransformed apart from translation, so
/// resolving a local offset is `group.position + local`.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    nodes: SlotMap<VisualHandle, Node>,
    groups: SlotMap<GroupHandle, Group>,
    released: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_alive(&self, handle: VisualHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Number of visuals created and not yet released.
    #[inline]
    pub fn live_visuals(&self) -> usize {
        self.nodes.len()
    }

    /// Number of `release_visual` calls that hit a live visual.
    #[inline]
    pub fn released_count(&self) -> usize {
        self.released
    }

    pub fn parent(&self, handle: VisualHandle) -> Option<GroupHandle> {
        self.nodes.get(handle)?.parent
    }

    /// Position local to the current parent.
    pub fn position(&self, handle: VisualHandle) -> Option<Vec2> {
        self.nodes.get(handle).map(|n| n.position)
    }

    /// Stage-space position; `None` when released or detached.
    pub fn world_position(&self, handle: VisualHandle) -> Option<Vec2> {
        let node = self.nodes.get(handle)?;
        let group = self.groups.get(node.parent?)?;
        Some(group.position + node.position)
    }

    pub fn z_index(&self, handle: VisualHandle) -> Option<ZIndex> {
        self.nodes.get(handle).map(|n| n.z)
    }

    pub fn spec(&self, handle: VisualHandle) -> Option<&VisualSpec> {
        self.nodes.get(handle).map(|n| &n.spec)
    }

    /// Current text of a label visual.
    pub fn text(&self, handle: VisualHandle) -> Option<&str> {
        match &self.nodes.get(handle)?.spec.kind {
            VisualKind::Label { text, .. } => Some(text.as_str()),
            VisualKind::Card { .. } => None,
        }
    }

    pub fn group_position(&self, group: GroupHandle) -> Option<Vec2> {
        self.groups.get(group).map(|g| g.position)
    }

    /// Visuals attached to `group`, bottom first.
    pub fn children(&self, group: GroupHandle) -> &[VisualHandle] {
        self.groups
            .get(group)
            .map(|g| g.children.as_slice())
            .unwrap_or(&[])
    }

    fn unlink(&mut self, handle: VisualHandle) {
        let Some(node) = self.nodes.get_mut(handle) else {
            return;
        };
        if let Some(group) = node.parent.take().and_then(|g| self.groups.get_mut(g)) {
            group.children.retain(|&h| h != handle);
        }
    }
}

impl RenderSurface for HeadlessSurface {
    fn create_group(&mut self) -> GroupHandle {
        self.groups.insert(Group::default())
    }

    fn release_group(&mut self, group: GroupHandle) {
        let Some(g) = self.groups.remove(group) else {
            return;
        };
        for handle in g.children {
            if let Some(node) = self.nodes.get_mut(handle) {
                node.parent = None;
            }
        }
    }

    fn set_group_position(&mut self, group: GroupHandle, pos: Vec2) {
        if let Some(g) = self.groups.get_mut(group) {
            g.position = pos;
        }
    }

    fn create_visual(&mut self, spec: &VisualSpec) -> VisualHandle {
        self.nodes.insert(Node {
            spec: spec.clone(),
            parent: None,
            position: Vec2::zero(),
            z: ZIndex::default(),
        })
    }

    fn release_visual(&mut self, handle: VisualHandle) {
        self.unlink(handle);
        if self.nodes.remove(handle).is_some() {
            self.released += 1;
        }
    }

    fn attach(&mut self, handle: VisualHandle, group: GroupHandle) {
        if !self.nodes.contains_key(handle) || !self.groups.contains_key(group) {
            return;
        }
        self.unlink(handle);
        if let Some(node) = self.nodes.get_mut(handle) {
            node.parent = Some(group);
        }
        if let Some(g) = self.groups.get_mut(group) {
            g.children.push(handle);
        }
    }

    fn detach(&mut self, handle: VisualHandle) {
        self.unlink(handle);
    }

    fn set_position(&mut self, handle: VisualHandle, pos: Vec2) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.position = pos;
        }
    }

    fn set_z_index(&mut self, handle: VisualHandle, z: ZIndex) {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.z = z;
        }
    }

    fn set_text(&mut self, handle: VisualHandle, new_text: &str) {
        if let Some(VisualKind::Label { text, .. }) =
            self.nodes.get_mut(handle).map(|n| &mut n.spec.kind)
        {
            new_text.clone_into(text);
        }
    }

    fn resolve_world_position(&self, group: GroupHandle, local: Vec2) -> Vec2 {
        self.group_position(group).unwrap_or_default() + local
    }
}
