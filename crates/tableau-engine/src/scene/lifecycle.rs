use std::any::Any;

use slotmap::new_key_type;

use crate::coords::Viewport;
use crate::surface::RenderSurface;
use crate::time::{Ticker, TickerToken};

use super::error::{Result, SceneError};

new_key_type! {
    /// Identity of a scene owned by a [`SceneDirector`](super::SceneDirector).
    pub struct SceneId;
}

/// Where a scene sits in its lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SceneState {
    Uninitialized,
    Active,
    Inactive,
    /// Terminal. Owned visuals have been released.
    Destroyed,
}

/// Everything a lifecycle transition may touch.
pub struct SceneCtx<'a> {
    pub id: SceneId,
    pub ticker: &'a mut Ticker<SceneId>,
    pub surface: &'a mut dyn RenderSurface,
    /// Current viewport, used for the resize pass that follows `init`.
    pub viewport: Viewport,
    /// Registration returned by the last `init`, handed back by the owner.
    /// `clean_up` and `destroy` take it out of the ticker.
    pub token: Option<TickerToken>,
}

/// Capability interface every scene implements.
///
/// `update` is only ever called by the ticker while the scene is
/// [`SceneState::Active`]. `resize` may arrive in `Active` or `Inactive` and
/// always lands between two updates.
pub trait Scene {
    fn name(&self) -> &str;

    fn state(&self) -> SceneState;

    /// `Uninitialized | Inactive -> Active`. Registers with the ticker and
    /// performs a resize pass with `cx.viewport`. The owner keeps the returned
    /// token and passes it back through [`SceneCtx::token`].
    fn init(&mut self, cx: &mut SceneCtx<'_>) -> Result<TickerToken>;

    /// Recomputes layout anchors. Never restarts in-flight animation.
    fn resize(&mut self, width: f32, height: f32, surface: &mut dyn RenderSurface);

    /// `Active -> Inactive`. Unregisters and clears presentation state, keeping
    /// owned resources for a later `init`.
    fn clean_up(&mut self, cx: &mut SceneCtx<'_>) -> Result<()>;

    /// `any -> Destroyed`. `clean_up` plus release of every owned visual.
    fn destroy(&mut self, cx: &mut SceneCtx<'_>);

    /// Advances the scene. `delta` is in frame units (see [`crate::time`]).
    fn update(&mut self, delta: f32, surface: &mut dyn RenderSurface);

    /// Downcast hook for tools that need scene-specific inspection.
    fn as_any(&self) -> &dyn Any;
}

/// Shared lifecycle bookkeeping, composed into concrete scenes.
///
/// Tracks the state; the ticker registration travels in [`SceneCtx::token`].
/// Scenes call the `begin_*`/`end_*` helpers at the matching points of their
/// own transitions.
#[derive(Debug)]
pub struct Lifecycle {
    name: String,
    state: SceneState,
}

impl Lifecycle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: SceneState::Uninitialized,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn state(&self) -> SceneState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == SceneState::Active
    }

    /// Whether `resize` should do any work in the current state.
    #[inline]
    pub fn can_resize(&self) -> bool {
        matches!(self.state, SceneState::Active | SceneState::Inactive)
    }

    /// Validates that `init` may proceed.
    pub fn check_init(&self) -> Result<()> {
        self.check_alive("initialized")
    }

    /// Moves to `Active` and registers with the ticker.
    ///
    /// Registering twice is harmless: when `cx.token` is still live in the
    /// ticker it is returned as is.
    pub fn begin_init(&mut self, cx: &mut SceneCtx<'_>) -> Result<TickerToken> {
        self.check_init()?;

        let token = match cx.token.filter(|t| cx.ticker.contains(*t)) {
            Some(existing) => {
                log::warn!("scene '{}' initialized twice; keeping registration", self.name);
                existing
            }
            None => cx.ticker.add(cx.id),
        };

        cx.token = Some(token);
        self.state = SceneState::Active;
        log::debug!("scene '{}' -> Active", self.name);
        Ok(token)
    }

    /// Unregisters from the ticker and moves to `Inactive`.
    pub fn end_clean_up(&mut self, cx: &mut SceneCtx<'_>) -> Result<()> {
        self.check_alive("cleaned up")?;
        self.unregister(cx);
        if self.state == SceneState::Active {
            self.state = SceneState::Inactive;
            log::debug!("scene '{}' -> Inactive", self.name);
        }
        Ok(())
    }

    /// Unregisters and moves to `Destroyed`.
    ///
    /// Returns `false` when the scene was already destroyed, in which case the
    /// caller must not release anything again.
    pub fn begin_destroy(&mut self, cx: &mut SceneCtx<'_>) -> bool {
        if self.state == SceneState::Destroyed {
            log::warn!("scene '{}' destroyed twice; ignoring", self.name);
            return false;
        }
        self.unregister(cx);
        self.state = SceneState::Destroyed;
        log::debug!("scene '{}' -> Destroyed", self.name);
        true
    }

    fn unregister(&self, cx: &mut SceneCtx<'_>) {
        let Some(token) = cx.token.take() else {
            return;
        };
        if cx.ticker.remove(token).is_none() {
            log::warn!("scene '{}' handed back a stale ticker token", self.name);
        }
    }

    fn check_alive(&self, action: &'static str) -> Result<()> {
        if self.state == SceneState::Destroyed {
            return Err(SceneError::Destroyed {
                scene: self.name.clone(),
                action,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;
    use crate::surface::HeadlessSurface;

    struct Harness {
        id: SceneId,
        ticker: Ticker<SceneId>,
        surface: HeadlessSurface,
        token: Option<TickerToken>,
    }

    impl Harness {
        fn new() -> Self {
            let mut ids: SlotMap<SceneId, ()> = SlotMap::with_key();
            Self {
                id: ids.insert(()),
                ticker: Ticker::new(),
                surface: HeadlessSurface::new(),
                token: None,
            }
        }

        /// Runs `f` with a context carrying the held token, then keeps
        /// whatever registration the transition left behind.
        fn with<R>(&mut self, f: impl FnOnce(&mut SceneCtx<'_>) -> R) -> R {
            let mut cx = SceneCtx {
                id: self.id,
                ticker: &mut self.ticker,
                surface: &mut self.surface,
                viewport: Viewport::new(800.0, 600.0),
                token: self.token,
            };
            let out = f(&mut cx);
            self.token = cx.token;
            out
        }
    }

    // ── transitions ───────────────────────────────────────────────────────

    #[test]
    fn init_registers_once() {
        let mut h = Harness::new();
        let mut lc = Lifecycle::new("test");

        let first = h.with(|cx| lc.begin_init(cx)).unwrap();
        let second = h.with(|cx| lc.begin_init(cx)).unwrap();

        assert_eq!(first, second);
        assert_eq!(h.token, Some(first));
        assert_eq!(h.ticker.len(), 1);
        assert_eq!(lc.state(), SceneState::Active);
    }

    #[test]
    fn clean_up_removes_the_handed_back_token() {
        let mut h = Harness::new();
        let mut lc = Lifecycle::new("test");

        let token = h.with(|cx| lc.begin_init(cx)).unwrap();
        h.with(|cx| lc.end_clean_up(cx)).unwrap();
        assert!(h.ticker.is_empty());
        assert!(!h.ticker.contains(token));
        assert_eq!(h.token, None);
        assert_eq!(lc.state(), SceneState::Inactive);
        assert!(lc.can_resize());

        let again = h.with(|cx| lc.begin_init(cx)).unwrap();
        assert_ne!(again, token);
        assert_eq!(h.ticker.len(), 1);
        assert!(lc.is_active());
    }

    #[test]
    fn stale_token_is_replaced_on_init() {
        let mut h = Harness::new();
        let mut lc = Lifecycle::new("test");

        let token = h.with(|cx| lc.begin_init(cx)).unwrap();
        h.ticker.remove(token);

        let fresh = h.with(|cx| lc.begin_init(cx)).unwrap();
        assert_ne!(fresh, token);
        assert!(h.ticker.contains(fresh));
        assert_eq!(h.ticker.len(), 1);
    }

    #[test]
    fn clean_up_before_init_stays_uninitialized() {
        let mut h = Harness::new();
        let mut lc = Lifecycle::new("test");
        h.with(|cx| lc.end_clean_up(cx)).unwrap();
        assert_eq!(lc.state(), SceneState::Uninitialized);
        assert!(!lc.can_resize());
    }

    #[test]
    fn destroyed_is_terminal() {
        let mut h = Harness::new();
        let mut lc = Lifecycle::new("test");

        h.with(|cx| lc.begin_init(cx)).unwrap();
        assert!(h.with(|cx| lc.begin_destroy(cx)));
        assert!(h.ticker.is_empty());
        assert_eq!(h.token, None);
        assert!(!h.with(|cx| lc.begin_destroy(cx)));

        let err = h.with(|cx| lc.begin_init(cx)).unwrap_err();
        let expected = SceneError::Destroyed {
            scene: "test".into(),
            action: "initialized",
        };
        assert_eq!(err, expected);
        assert!(h.with(|cx| lc.end_clean_up(cx)).is_err());
        assert!(!lc.can_resize());
    }
}
