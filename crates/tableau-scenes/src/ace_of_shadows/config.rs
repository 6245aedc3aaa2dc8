use tableau_engine::coords::{ColorRgba, Vec2};
use tableau_engine::surface::{VisualKind, VisualSpec};

/// Tunables for the card-transfer scene.
///
/// Defaults reproduce the classic setup: 144 cards, one spawn per second,
/// two seconds per transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct AceConfig {
    pub total_cards: usize,
    pub spawn_interval_ms: f64,
    pub transfer_duration_ms: f64,
    /// Vertical distance between consecutive cards of a pile, in pixels.
    pub stack_offset: f32,

    pub card_size: Vec2,
    pub card_corner_radius: f32,
    pub card_fill: ColorRgba,
    pub card_border: ColorRgba,
    pub card_alpha: f32,

    pub label_font_size: f32,
    pub label_color: ColorRgba,
}

impl Default for AceConfig {
    fn default() -> Self {
        Self {
            total_cards: 144,
            spawn_interval_ms: 1000.0,
            transfer_duration_ms: 2000.0,
            stack_offset: 1.0,

            card_size: Vec2::new(100.0, 150.0),
            card_corner_radius: 8.0,
            card_fill: ColorRgba::from_hex(0x2233aa),
            card_border: ColorRgba::white(),
            card_alpha: 0.5,

            label_font_size: 16.0,
            label_color: ColorRgba::white(),
        }
    }
}

impl AceConfig {
    pub fn total_cards(mut self, n: usize) -> Self {
        self.total_cards = n;
        self
    }

    pub fn spawn_interval_ms(mut self, ms: f64) -> Self {
        self.spawn_interval_ms = ms;
        self
    }

    pub fn transfer_duration_ms(mut self, ms: f64) -> Self {
        self.transfer_duration_ms = ms;
        self
    }

    pub fn stack_offset(mut self, px: f32) -> Self {
        self.stack_offset = px;
        self
    }

    /// Upper bound on simultaneously moving cards, `ceil(duration / interval)`.
    ///
    /// Holds after every update: by the end of the update that spawns a card,
    /// the one that left `ceil(duration / interval)` spawns earlier has landed.
    pub fn max_concurrent(&self) -> usize {
        if self.spawn_interval_ms <= 0.0 {
            return self.total_cards;
        }
        (self.transfer_duration_ms / self.spawn_interval_ms).ceil().max(0.0) as usize
    }

    /// Visual spec of the card showing `number` (1-based).
    pub fn card_spec(&self, number: u32) -> VisualSpec {
        let number_color = if number % 2 == 0 {
            ColorRgba::red()
        } else {
            ColorRgba::black()
        };
        VisualSpec {
            kind: VisualKind::Card {
                number,
                size: self.card_size,
                corner_radius: self.card_corner_radius,
                fill: self.card_fill,
                border: self.card_border,
                number_color,
            },
            alpha: self.card_alpha,
        }
    }

    pub fn label_spec(&self, text: &str) -> VisualSpec {
        VisualSpec::label(text, self.label_font_size, self.label_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_two_in_flight() {
        assert_eq!(AceConfig::default().max_concurrent(), 2);
    }

    #[test]
    fn builder_overrides() {
        let c = AceConfig::default()
            .total_cards(3)
            .spawn_interval_ms(500.0)
            .transfer_duration_ms(1250.0);
        assert_eq!(c.total_cards, 3);
        assert_eq!(c.max_concurrent(), 3);
    }

    #[test]
    fn even_cards_are_red() {
        let c = AceConfig::default();
        let color = |n| match c.card_spec(n).kind {
            VisualKind::Card { number_color, .. } => number_color,
            VisualKind::Label { .. } => unreachable!(),
        };
        assert_eq!(color(2), ColorRgba::red());
        assert_eq!(color(3), ColorRgba::black());
        assert_eq!(c.card_spec(1).alpha, 0.5);
    }
}
