//! "Ace of Shadows": a deck of cards moved one at a time from a left pile to
//! a right pile.
//!
//! Every `spawn_interval_ms` the top card of the left pile lifts off and eases
//! across to the right pile over `transfer_duration_ms`. Transfers overlap, so
//! a couple of cards are usually in the air at once. Resizing the viewport
//! moves both piles; cards in flight bend toward the new right pile instead of
//! restarting.
//!
//! Layout of the module:
//! - [`card`]: `Card` and `Stack`
//! - [`controller`]: spawn cadence, easing, arrival bookkeeping
//! - [`layout`]: anchors derived from the viewport
//! - [`config`]: tunables

pub mod card;
pub mod config;
pub mod controller;
pub mod easing;
pub mod layout;

use std::any::Any;

use tableau_engine::coords::Viewport;
use tableau_engine::scene::{Lifecycle, Scene, SceneCtx, SceneError, SceneState};
use tableau_engine::surface::{GroupHandle, RenderSurface, VisualArena, VisualHandle};
use tableau_engine::time::{frame_units_to_ms, TickerToken};

pub use config::AceConfig;
pub use controller::{StackGroups, TickReport, TransferController};
pub use layout::StackLayout;

/// Surface resources owned by the scene, created on first `init`.
#[derive(Debug)]
struct Stage {
    groups: StackGroups,
    /// Holds the counter labels at the stage origin.
    hud: GroupHandle,
    left_label: VisualHandle,
    right_label: VisualHandle,
    controller: TransferController,
}

/// The card-transfer scene.
pub struct AceOfShadows {
    lifecycle: Lifecycle,
    config: AceConfig,
    arena: VisualArena,
    stage: Option<Stage>,
    layout: StackLayout,
}

impl AceOfShadows {
    pub const NAME: &'static str = "Ace of Shadows";

    pub fn new(config: AceConfig) -> Self {
        Self {
            lifecycle: Lifecycle::new(Self::NAME),
            config,
            arena: VisualArena::new(),
            stage: None,
            layout: StackLayout::default(),
        }
    }

    pub fn config(&self) -> &AceConfig {
        &self.config
    }

    /// `None` until the first `init` and after `destroy`.
    pub fn controller(&self) -> Option<&TransferController> {
        self.stage.as_ref().map(|s| &s.controller)
    }

    pub fn layout(&self) -> StackLayout {
        self.layout
    }

    pub fn groups(&self) -> Option<StackGroups> {
        self.stage.as_ref().map(|s| s.groups)
    }

    /// `(left, right)` counter label handles.
    pub fn labels(&self) -> Option<(VisualHandle, VisualHandle)> {
        self.stage.as_ref().map(|s| (s.left_label, s.right_label))
    }

    /// Number of visuals the scene currently owns.
    pub fn owned_visuals(&self) -> usize {
        self.arena.len()
    }

    fn build_stage(&mut self, surface: &mut dyn RenderSurface) -> Stage {
        let groups = StackGroups {
            left: surface.create_group(),
            right: surface.create_group(),
            animating: surface.create_group(),
        };
        let hud = surface.create_group();

        let visuals: Vec<VisualHandle> = (0..self.config.total_cards)
            .map(|i| {
                let spec = self.config.card_spec(i as u32 + 1);
                self.arena.create(surface, &spec)
            })
            .collect();

        let left_label = self.arena.create(surface, &self.config.label_spec("Left Stack: 0"));
        let right_label = self.arena.create(surface, &self.config.label_spec("Right Stack: 0"));

        log::debug!("'{}' created {} visuals", Self::NAME, self.arena.len());

        Stage {
            groups,
            hud,
            left_label,
            right_label,
            controller: TransferController::new(&self.config, groups, &visuals),
        }
    }
}

impl Stage {
    fn refresh_labels(&self, surface: &mut dyn RenderSurface) {
        let c = &self.controller;
        surface.set_text(self.left_label, &format!("Left Stack: {}", c.left_count()));
        surface.set_text(self.right_label, &format!("Right Stack: {}", c.right_count()));
    }

    fn clear_presentation(&self, surface: &mut dyn RenderSurface) {
        self.controller.clear_presentation(surface);
        surface.detach(self.left_label);
        surface.detach(self.right_label);
    }

    fn release_groups(&self, surface: &mut dyn RenderSurface) {
        let g = self.groups;
        for group in [g.left, g.right, g.animating, self.hud] {
            surface.release_group(group);
        }
    }
}

impl Scene for AceOfShadows {
    fn name(&self) -> &str {
        self.lifecycle.name()
    }

    fn state(&self) -> SceneState {
        self.lifecycle.state()
    }

    /// Always restarts the transfer from a full left pile.
    fn init(&mut self, cx: &mut SceneCtx<'_>) -> Result<TickerToken, SceneError> {
        self.lifecycle.check_init()?;

        let mut stage = match self.stage.take() {
            Some(stage) => stage,
            None => self.build_stage(cx.surface),
        };
        stage.controller.restart(cx.surface);
        cx.surface.attach(stage.left_label, stage.hud);
        cx.surface.attach(stage.right_label, stage.hud);
        stage.refresh_labels(cx.surface);
        self.stage = Some(stage);

        let token = self.lifecycle.begin_init(cx)?;
        let Viewport { width, height } = cx.viewport;
        self.resize(width, height, cx.surface);
        Ok(token)
    }

    fn resize(&mut self, width: f32, height: f32, surface: &mut dyn RenderSurface) {
        if !self.lifecycle.can_resize() {
            log::warn!("'{}' ignored resize while {:?}", Self::NAME, self.lifecycle.state());
            return;
        }
        let Some(stage) = self.stage.as_mut() else {
            return;
        };

        let next = StackLayout::compute(Viewport::new(width, height));
        let delta = self.layout.right_delta(&next);

        let g = stage.groups;
        surface.set_group_position(g.left, next.left_anchor);
        surface.set_group_position(g.right, next.right_anchor);
        surface.set_position(stage.left_label, next.left_label);
        surface.set_position(stage.right_label, next.right_label);

        let shifted = stage.controller.shift_in_flight_targets(delta);
        log::debug!("'{}' resized to {width}x{height}, {shifted} cards retargeted", Self::NAME);

        self.layout = next;
    }

    /// Keeps cards and counters as they are; the next `init` restarts anyway.
    fn clean_up(&mut self, cx: &mut SceneCtx<'_>) -> Result<(), SceneError> {
        self.lifecycle.end_clean_up(cx)?;
        if let Some(stage) = self.stage.as_ref() {
            stage.clear_presentation(cx.surface);
        }
        Ok(())
    }

    fn destroy(&mut self, cx: &mut SceneCtx<'_>) {
        if !self.lifecycle.begin_destroy(cx) {
            return;
        }
        if let Some(stage) = self.stage.take() {
            stage.clear_presentation(cx.surface);
            stage.release_groups(cx.surface);
        }
        let released = self.arena.release_all(cx.surface);
        log::debug!("'{}' released {released} visuals", Self::NAME);
    }

    fn update(&mut self, delta: f32, surface: &mut dyn RenderSurface) {
        if !self.lifecycle.is_active() {
            return;
        }
        let Some(stage) = self.stage.as_mut() else {
            return;
        };

        let delta_ms = f64::from(frame_units_to_ms(delta));
        let report = stage.controller.update(delta_ms, surface);
        if report.counts_changed() {
            stage.refresh_labels(surface);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
