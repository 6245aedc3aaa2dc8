use slotmap::new_key_type;

use crate::coords::{ColorRgba, Vec2};

new_key_type! {
    /// Opaque handle to a renderable resource created by a surface.
    pub struct VisualHandle;
    /// Opaque handle to a positioned group of visuals.
    pub struct GroupHandle;
}

/// What a visual depicts.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualKind {
    /// A numbered playing card, drawn centered on its position.
    Card {
        number: u32,
        size: Vec2,
        corner_radius: f32,
        fill: ColorRgba,
        border: ColorRgba,
        number_color: ColorRgba,
    },
    /// A single line of text anchored at its top-left corner.
    Label {
        text: String,
        font_size: f32,
        color: ColorRgba,
    },
}

/// Creation parameters for a visual.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSpec {
    pub kind: VisualKind,
    pub alpha: f32,
}

impl VisualSpec {
    pub fn label(text: impl Into<String>, font_size: f32, color: ColorRgba) -> Self {
        Self {
            kind: VisualKind::Label {
                text: text.into(),
                font_size,
                color,
            },
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}
