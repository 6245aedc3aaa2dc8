use tableau_engine::coords::Vec2;
use tableau_engine::surface::{GroupHandle, RenderSurface, VisualHandle, ZIndex};

use super::card::{slot_offset, Card, Stack};
use super::config::AceConfig;
use super::easing::ease_in_out_quad;

/// Surface groups the controller moves card visuals between.
#[derive(Debug, Copy, Clone)]
pub struct StackGroups {
    pub left: GroupHandle,
    pub right: GroupHandle,
    /// Sits at the stage origin; moving cards are positioned in stage space.
    pub animating: GroupHandle,
}

/// What changed during one [`TransferController::update`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: Option<usize>,
    pub arrived: usize,
}

impl TickReport {
    #[inline]
    pub fn counts_changed(&self) -> bool {
        self.spawned.is_some() || self.arrived > 0
    }
}

/// Moves cards from the left pile to the right pile on a fixed cadence.
///
/// Cards leave the left pile top first (highest index first) and land on the
/// right pile in arrival order. The moving cards always form the contiguous
/// index window `next_index + 1 ..= active_from`.
///
/// Invariants, at every point between two updates:
/// - `left_count + animating_count() + right_count == total_cards`
/// - `next_index` and `active_from` never increase, and `active_from >= next_index`
#[derive(Debug)]
pub struct TransferController {
    total_cards: usize,
    spawn_interval_ms: f64,
    transfer_duration_ms: f64,
    stack_offset: f32,

    groups: StackGroups,
    cards: Vec<Card>,
    left: Stack,
    right: Stack,

    elapsed_time: f64,
    last_move_time: f64,
    next_index: isize,
    active_from: isize,
    left_count: usize,
    right_count: usize,
}

impl TransferController {
    /// Builds a controller owning one card per visual, all resting on the left.
    ///
    /// Visual `i` becomes card `i`. Call [`restart`](Self::restart) to put the
    /// visuals on the surface.
    pub fn new(config: &AceConfig, groups: StackGroups, visuals: &[VisualHandle]) -> Self {
        let cards: Vec<Card> = visuals
            .iter()
            .enumerate()
            .map(|(i, &v)| Card::new(i, v))
            .collect();
        let total = cards.len();

        let mut controller = Self {
            total_cards: total,
            spawn_interval_ms: config.spawn_interval_ms,
            transfer_duration_ms: config.transfer_duration_ms,
            stack_offset: config.stack_offset,
            groups,
            cards,
            left: Stack::new(groups.left),
            right: Stack::new(groups.right),
            elapsed_time: 0.0,
            last_move_time: 0.0,
            next_index: -1,
            active_from: -1,
            left_count: 0,
            right_count: 0,
        };
        controller.reset_counters();
        controller
    }

    /// Puts every card back on the left pile and restarts the clock.
    pub fn restart(&mut self, surface: &mut dyn RenderSurface) {
        self.clear_presentation(surface);
        self.reset_counters();
        self.left.clear();
        self.right.clear();

        for card in &mut self.cards {
            card.initial_position = slot_offset(card.index, self.stack_offset);
            card.target_position = card.initial_position;
            card.elapsed = 0.0;
            card.is_animating = false;

            surface.attach(card.visual, self.groups.left);
            surface.set_position(card.visual, card.initial_position);
            surface.set_z_index(card.visual, ZIndex::from_index(card.index));
            self.left.push(card.index);
        }

        log::debug!("card transfer restarted with {} cards", self.total_cards);
    }

    /// Detaches every card visual. Piles, counters and cards are left as is.
    pub fn clear_presentation(&self, surface: &mut dyn RenderSurface) {
        for card in &self.cards {
            surface.detach(card.visual);
        }
    }

    fn reset_counters(&mut self) {
        self.elapsed_time = 0.0;
        self.last_move_time = 0.0;
        self.next_index = self.total_cards as isize - 1;
        self.active_from = self.next_index;
        self.left_count = self.total_cards;
        self.right_count = 0;
    }

    /// Advances the simulation by `delta_ms`.
    ///
    /// The spawn check runs first; a card spawned during this call starts
    /// moving on the next one.
    pub fn update(&mut self, delta_ms: f64, surface: &mut dyn RenderSurface) -> TickReport {
        let mut report = TickReport::default();
        if self.cards.is_empty() {
            return report;
        }

        self.elapsed_time += delta_ms;
        report.spawned = self.try_spawn(surface);

        let mut i = self.active_from;
        while i > self.next_index {
            let current = i;
            i -= 1;

            let Some(index) = self.slot(current) else {
                continue;
            };
            if report.spawned == Some(index) || !self.cards[index].is_animating {
                continue;
            }
            if self.advance(index, delta_ms, surface) {
                report.arrived += 1;
            }
        }

        report
    }

    fn try_spawn(&mut self, surface: &mut dyn RenderSurface) -> Option<usize> {
        let since_last = self.elapsed_time - self.last_move_time;
        if since_last < self.spawn_interval_ms || self.left_count == 0 {
            return None;
        }
        self.last_move_time = self.elapsed_time;

        let index = self.left.top()?;
        debug_assert_eq!(self.slot(self.next_index), Some(index), "left pile top out of sync");
        self.left.pop();

        let initial = surface.resolve_world_position(
            self.left.group(),
            slot_offset(index, self.stack_offset),
        );
        let target = surface.resolve_world_position(
            self.right.group(),
            slot_offset(self.right_count, self.stack_offset),
        );

        let card = &mut self.cards[index];
        card.initial_position = initial;
        card.target_position = target;
        card.elapsed = 0.0;
        card.is_animating = true;

        surface.attach(card.visual, self.groups.animating);
        surface.set_position(card.visual, initial);
        surface.set_z_index(card.visual, ZIndex::from_index(self.total_cards.saturating_mul(2)));

        self.next_index -= 1;
        self.left_count -= 1;
        log::trace!("card {index} spawned at t={:.1}ms", self.elapsed_time);
        Some(index)
    }

    /// Moves one card forward. Returns `true` when it landed.
    fn advance(&mut self, index: usize, delta_ms: f64, surface: &mut dyn RenderSurface) -> bool {
        let card = &mut self.cards[index];
        card.elapsed += delta_ms;

        let t = if self.transfer_duration_ms > 0.0 {
            (card.elapsed / self.transfer_duration_ms).min(1.0)
        } else {
            1.0
        };
        let eased = ease_in_out_quad(t as f32);
        let pos = Vec2::lerp(card.initial_position, card.target_position, eased);
        surface.set_position(card.visual, pos);

        if t < 1.0 {
            return false;
        }

        card.is_animating = false;
        surface.attach(card.visual, self.groups.right);
        surface.set_position(card.visual, slot_offset(self.right_count, self.stack_offset));
        surface.set_z_index(card.visual, ZIndex::from_index(self.right_count));

        self.right.push(index);
        self.active_from -= 1;
        self.right_count += 1;
        log::trace!("card {index} arrived at t={:.1}ms", self.elapsed_time);
        true
    }

    /// Shifts the target of every card in flight by `delta`.
    ///
    /// Progress is untouched. Returns how many cards were shifted.
    pub fn shift_in_flight_targets(&mut self, delta: Vec2) -> usize {
        let mut shifted = 0;
        let mut i = self.active_from;
        while i > self.next_index {
            if let Some(index) = self.slot(i) {
                let card = &mut self.cards[index];
                if card.is_animating {
                    card.target_position += delta;
                    shifted += 1;
                }
            }
            i -= 1;
        }
        shifted
    }

    /// Maps a window position to a valid card index; out of range yields `None`.
    #[inline]
    fn slot(&self, i: isize) -> Option<usize> {
        usize::try_from(i).ok().filter(|&i| i < self.cards.len())
    }

    // ── inspection ────────────────────────────────────────────────────────

    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[inline]
    pub fn left(&self) -> &Stack {
        &self.left
    }

    #[inline]
    pub fn right(&self) -> &Stack {
        &self.right
    }

    #[inline]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    #[inline]
    pub fn left_count(&self) -> usize {
        self.left_count
    }

    #[inline]
    pub fn right_count(&self) -> usize {
        self.right_count
    }

    pub fn animating_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_animating).count()
    }

    #[inline]
    pub fn next_index(&self) -> isize {
        self.next_index
    }

    #[inline]
    pub fn active_from(&self) -> isize {
        self.active_from
    }

    /// Scene-relative clock in milliseconds.
    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }
}
