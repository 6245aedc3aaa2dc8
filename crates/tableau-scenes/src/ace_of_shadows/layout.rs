use tableau_engine::coords::{Vec2, Viewport};

/// Anchors of everything the card scene positions, derived from the viewport.
///
/// Non-positive viewports are not rejected; they simply produce
/// non-positive anchors.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct StackLayout {
    pub left_anchor: Vec2,
    pub right_anchor: Vec2,
    pub left_label: Vec2,
    pub right_label: Vec2,
}

/// Distance of the right counter label from the right edge.
const RIGHT_LABEL_INSET: f32 = 125.0;
const LEFT_LABEL_X: f32 = 10.0;

impl StackLayout {
    pub fn compute(viewport: Viewport) -> Self {
        let label_y = viewport.height * 0.3;
        Self {
            left_anchor: viewport.point_at(0.25, 0.5),
            right_anchor: viewport.point_at(0.75, 0.5),
            left_label: Vec2::new(LEFT_LABEL_X, label_y),
            right_label: Vec2::new(viewport.width - RIGHT_LABEL_INSET, label_y),
        }
    }

    /// How far the right anchor moves going from `self` to `next`.
    ///
    /// Only the right anchor matters to cards in flight, since every
    /// transition ends on the right pile.
    #[inline]
    pub fn right_delta(&self, next: &StackLayout) -> Vec2 {
        next.right_anchor - self.right_anchor
    }
}
