use super::{RenderSurface, VisualHandle, VisualSpec};

/// Visuals created on behalf of one scene.
///
/// The arena is the single owner of those handles: scenes borrow them for
/// positioning and re-parenting, and only [`release_all`](Self::release_all)
/// frees them.
#[derive(Debug, Default)]
pub struct VisualArena {
    handles: Vec<VisualHandle>,
}

impl VisualArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, surface: &mut dyn RenderSurface, spec: &VisualSpec) -> VisualHandle {
        let handle = surface.create_visual(spec);
        self.handles.push(handle);
        handle
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Releases every owned visual. Returns how many were released.
    pub fn release_all(&mut self, surface: &mut dyn RenderSurface) -> usize {
        let n = self.handles.len();
        for handle in self.handles.drain(..) {
            surface.release_visual(handle);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ColorRgba;
    use crate::surface::HeadlessSurface;

    #[test]
    fn release_all_frees_every_visual_once() {
        let mut surface = HeadlessSurface::new();
        let mut arena = VisualArena::new();
        let spec = VisualSpec::label("x", 12.0, ColorRgba::white());

        let a = arena.create(&mut surface, &spec);
        let b = arena.create(&mut surface, &spec);
        assert_eq!(surface.live_visuals(), 2);

        assert_eq!(arena.release_all(&mut surface), 2);
        assert!(arena.is_empty());
        assert!(!surface.is_alive(a));
        assert!(!surface.is_alive(b));
        assert_eq!(surface.released_count(), 2);

        assert_eq!(arena.release_all(&mut surface), 0);
        assert_eq!(surface.released_count(), 2);
    }
}
