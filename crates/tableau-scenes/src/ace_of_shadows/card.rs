use tableau_engine::coords::Vec2;
use tableau_engine::surface::{GroupHandle, VisualHandle};

/// One transferable card.
#[derive(Debug, Clone)]
pub struct Card {
    /// Stable identity in `0..total_cards`; also the creation order.
    pub index: usize,
    pub visual: VisualHandle,
    /// Stage-space start of the current transition.
    pub initial_position: Vec2,
    /// Stage-space end of the current transition.
    pub target_position: Vec2,
    /// Milliseconds since the current transition started.
    pub elapsed: f64,
    pub is_animating: bool,
}

impl Card {
    pub fn new(index: usize, visual: VisualHandle) -> Self {
        Self {
            index,
            visual,
            initial_position: Vec2::zero(),
            target_position: Vec2::zero(),
            elapsed: 0.0,
            is_animating: false,
        }
    }
}

/// Ordered pile of resting cards at one anchor.
///
/// Insertion order is stacking order: the last pushed index is the top.
#[derive(Debug, Clone)]
pub struct Stack {
    group: GroupHandle,
    cards: Vec<usize>,
}

impl Stack {
    pub fn new(group: GroupHandle) -> Self {
        Self {
            group,
            cards: Vec::new(),
        }
    }

    #[inline]
    pub fn group(&self) -> GroupHandle {
        self.group
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn top(&self) -> Option<usize> {
        self.cards.last().copied()
    }

    #[inline]
    pub fn push(&mut self, index: usize) {
        self.cards.push(index);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<usize> {
        self.cards.pop()
    }

    /// Card indices, bottom first.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.cards
    }

    #[inline]
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Local offset of the `slot`-th card of a pile (slot 0 sits on the anchor).
#[inline]
pub fn slot_offset(slot: usize, stack_offset: f32) -> Vec2 {
    Vec2::new(0.0, -(slot as f32) * stack_offset)
}
