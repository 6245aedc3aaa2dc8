use super::Vec2;

/// Viewport size in logical pixels.
///
/// Scenes derive their layout anchors from this on every resize.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Point at fractional position `(fx, fy)` of the viewport.
    ///
    /// Not clamped: a non-positive viewport yields non-positive points.
    #[inline]
    pub fn point_at(self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_at_scales_both_axes() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.point_at(0.25, 0.5), Vec2::new(200.0, 300.0));
    }

    #[test]
    fn negative_viewport_is_invalid_but_computes() {
        let vp = Viewport::new(-100.0, 50.0);
        assert!(!vp.is_valid());
        assert_eq!(vp.point_at(0.5, 0.5), Vec2::new(-50.0, 25.0));
    }
}
