use slotmap::{SecondaryMap, SlotMap};

use crate::coords::Viewport;
use crate::surface::RenderSurface;
use crate::time::{Ticker, TickerToken};

use super::error::{Result, SceneError};
use super::lifecycle::{Scene, SceneCtx, SceneId, SceneState};

/// Owns a set of scenes and keeps at most one of them current.
///
/// The director is the only caller of the lifecycle methods: it cleans the
/// current scene up before activating another, forwards viewport changes to
/// the current scene, and destroys everything on [`shutdown`](Self::shutdown).
///
/// The token each scene returns from `init` is kept here and handed back on
/// `clean_up` and `destroy`.
///
/// Ticks and resizes both take `&mut self`, so a resize can never interleave
/// with an update in progress.
pub struct SceneDirector<S: RenderSurface> {
    scenes: SlotMap<SceneId, Box<dyn Scene>>,
    tokens: SecondaryMap<SceneId, TickerToken>,
    ticker: Ticker<SceneId>,
    surface: S,
    viewport: Viewport,
    current: Option<SceneId>,
}

impl<S: RenderSurface> SceneDirector<S> {
    pub fn new(surface: S, viewport: Viewport) -> Self {
        Self {
            scenes: SlotMap::with_key(),
            tokens: SecondaryMap::new(),
            ticker: Ticker::new(),
            surface,
            viewport,
            current: None,
        }
    }

    /// Takes ownership of a scene. It stays uninitialized until switched to.
    pub fn add_scene(&mut self, scene: Box<dyn Scene>) -> SceneId {
        log::debug!("scene '{}' added", scene.name());
        self.scenes.insert(scene)
    }

    #[inline]
    pub fn current(&self) -> Option<SceneId> {
        self.current
    }

    pub fn scene(&self, id: SceneId) -> Option<&dyn Scene> {
        self.scenes.get(id).map(|s| s.as_ref())
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of scenes currently receiving ticks.
    #[inline]
    pub fn ticking(&self) -> usize {
        self.ticker.len()
    }

    /// Makes `id` the current scene.
    ///
    /// Switching to the current scene is a no-op. Otherwise the current scene
    /// is cleaned up first, then `id` is initialized.
    pub fn switch_to(&mut self, id: SceneId) -> Result<()> {
        if self.current == Some(id) {
            return Ok(());
        }

        let target = self.scenes.get(id).ok_or(SceneError::UnknownScene)?;
        if target.state() == SceneState::Destroyed {
            return Err(SceneError::Destroyed {
                scene: target.name().to_string(),
                action: "switched to",
            });
        }

        if let Some(prev) = self.current.take() {
            let token = self.tokens.remove(prev);
            self.with_scene(prev, token, |scene, cx| scene.clean_up(cx))?;
        }

        let held = self.tokens.get(id).copied();
        let token = self.with_scene(id, held, |scene, cx| {
            let token = scene.init(cx)?;
            log::info!("switched to scene '{}'", scene.name());
            Ok(token)
        })?;
        self.tokens.insert(id, token);
        self.current = Some(id);
        Ok(())
    }

    /// Records the new viewport and forwards it to the current scene.
    ///
    /// Other scenes pick the viewport up on their next `init`.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        if !self.viewport.is_valid() {
            log::debug!("resize to non-positive viewport {width}x{height}");
        }

        let Some(scene) = self.current.and_then(|id| self.scenes.get_mut(id)) else {
            return;
        };
        scene.resize(width, height, &mut self.surface);
    }

    /// Drives one frame: every scene registered with the ticker is updated
    /// once, in registration order.
    pub fn tick(&mut self, delta: f32) {
        let Self { scenes, ticker, surface, .. } = self;
        ticker.tick(delta, |id, delta| {
            if let Some(scene) = scenes.get_mut(*id) {
                scene.update(delta, &mut *surface);
            }
        });
    }

    /// Destroys every scene exactly once.
    pub fn shutdown(&mut self) {
        self.current = None;
        let ids: Vec<SceneId> = self.scenes.keys().collect();
        for id in ids {
            let token = self.tokens.remove(id);
            let destroyed = self.with_scene(id, token, |scene, cx| {
                scene.destroy(cx);
                Ok(())
            });
            if let Err(err) = destroyed {
                log::warn!("shutdown skipped a scene: {err}");
            }
        }
        log::info!("director shut down ({} scenes)", self.scenes.len());
    }

    fn with_scene<R, F>(&mut self, id: SceneId, token: Option<TickerToken>, f: F) -> Result<R>
    where
        F: FnOnce(&mut dyn Scene, &mut SceneCtx<'_>) -> Result<R>,
    {
        let scene = self.scenes.get_mut(id).ok_or(SceneError::UnknownScene)?;
        let mut cx = SceneCtx {
            id,
            ticker: &mut self.ticker,
            surface: &mut self.surface,
            viewport: self.viewport,
            token,
        };
        f(scene.as_mut(), &mut cx)
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::scene::Lifecycle;
    use crate::surface::HeadlessSurface;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Minimal scene that journals every lifecycle call.
    struct Journal {
        lifecycle: Lifecycle,
        log: Log,
        updates: u32,
    }

    impl Journal {
        fn boxed(name: &str, log: &Log) -> Box<dyn Scene> {
            Box::new(Self {
                lifecycle: Lifecycle::new(name),
                log: log.clone(),
                updates: 0,
            })
        }

        fn note(&self, what: &str) {
            self.log.borrow_mut().push(format!("{}:{what}", self.lifecycle.name()));
        }
    }

    impl Scene for Journal {
        fn name(&self) -> &str {
            self.lifecycle.name()
        }

        fn state(&self) -> SceneState {
            self.lifecycle.state()
        }

        fn init(&mut self, cx: &mut SceneCtx<'_>) -> Result<TickerToken> {
            let token = self.lifecycle.begin_init(cx)?;
            self.note("init");
            self.resize(cx.viewport.width, cx.viewport.height, cx.surface);
            Ok(token)
        }

        fn resize(&mut self, width: f32, height: f32, _surface: &mut dyn RenderSurface) {
            self.note(&format!("resize {width}x{height}"));
        }

        fn clean_up(&mut self, cx: &mut SceneCtx<'_>) -> Result<()> {
            self.lifecycle.end_clean_up(cx)?;
            self.note("clean_up");
            Ok(())
        }

        fn destroy(&mut self, cx: &mut SceneCtx<'_>) {
            if self.lifecycle.begin_destroy(cx) {
                self.note("destroy");
            }
        }

        fn update(&mut self, _delta: f32, _surface: &mut dyn RenderSurface) {
            self.updates += 1;
            self.note("update");
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn director() -> SceneDirector<HeadlessSurface> {
        SceneDirector::new(HeadlessSurface::new(), Viewport::new(800.0, 600.0))
    }

    fn updates(d: &SceneDirector<HeadlessSurface>, id: SceneId) -> u32 {
        d.scene(id)
            .and_then(|s| s.as_any().downcast_ref::<Journal>())
            .map(|p| p.updates)
            .unwrap()
    }

    // ── switching ─────────────────────────────────────────────────────────

    #[test]
    fn switch_cleans_up_previous_before_init() {
        let log = Log::default();
        let mut d = director();
        let a = d.add_scene(Journal::boxed("a", &log));
        let b = d.add_scene(Journal::boxed("b", &log));

        d.switch_to(a).unwrap();
        d.switch_to(b).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["a:init", "a:resize 800x600", "a:clean_up", "b:init", "b:resize 800x600"]
        );
        assert_eq!(d.current(), Some(b));
        assert_eq!(d.scene(a).unwrap().state(), SceneState::Inactive);
        assert_eq!(d.ticking(), 1);
    }

    #[test]
    fn init_token_is_held_and_handed_back() {
        let log = Log::default();
        let mut d = director();
        let a = d.add_scene(Journal::boxed("a", &log));
        let b = d.add_scene(Journal::boxed("b", &log));

        d.switch_to(a).unwrap();
        let token_a = d.tokens[a];
        assert!(d.ticker.contains(token_a));

        d.switch_to(b).unwrap();
        assert!(!d.tokens.contains_key(a));
        assert!(!d.ticker.contains(token_a));
        assert_eq!(d.ticker.targets().collect::<Vec<_>>(), vec![&b]);

        d.shutdown();
        assert!(d.tokens.is_empty());
    }

    #[test]
    fn switching_to_current_is_a_noop() {
        let log = Log::default();
        let mut d = director();
        let a = d.add_scene(Journal::boxed("a", &log));

        d.switch_to(a).unwrap();
        d.switch_to(a).unwrap();
        assert_eq!(log.borrow().iter().filter(|l| l.ends_with(":init")).count(), 1);
    }

    #[test]
    fn unknown_scene_is_an_error() {
        let log = Log::default();
        let mut d = director();
        let a = d.add_scene(Journal::boxed("a", &log));
        d.switch_to(a).unwrap();

        let gone = d.add_scene(Journal::boxed("gone", &log));
        d.scenes.remove(gone);

        assert_eq!(d.switch_to(gone), Err(SceneError::UnknownScene));
        assert_eq!(d.current(), Some(a));
        assert_eq!(d.scene(a).unwrap().state(), SceneState::Active);
    }

    // ── ticking and resize ────────────────────────────────────────────────

    #[test]
    fn only_the_current_scene_ticks() {
        let log = Log::default();
        let mut d = director();
        let a = d.add_scene(Journal::boxed("a", &log));
        let b = d.add_scene(Journal::boxed("b", &log));

        d.switch_to(a).unwrap();
        d.tick(1.0);
        d.tick(1.0);
        d.switch_to(b).unwrap();
        d.tick(1.0);

        assert_eq!(updates(&d, a), 2);
        assert_eq!(updates(&d, b), 1);
    }

    #[test]
    fn resize_reaches_current_scene_only() {
        let log = Log::default();
        let mut d = director();
        let a = d.add_scene(Journal::boxed("a", &log));
        d.add_scene(Journal::boxed("b", &log));

        d.switch_to(a).unwrap();
        log.borrow_mut().clear();
        d.resize(1024.0, 768.0);

        assert_eq!(*log.borrow(), vec!["a:resize 1024x768"]);
        assert_eq!(d.viewport(), Viewport::new(1024.0, 768.0));
    }

    // ── shutdown ──────────────────────────────────────────────────────────

    #[test]
    fn shutdown_destroys_each_scene_once() {
        let log = Log::default();
        let mut d = director();
        let a = d.add_scene(Journal::boxed("a", &log));
        let b = d.add_scene(Journal::boxed("b", &log));
        d.switch_to(a).unwrap();

        d.shutdown();
        d.shutdown();

        let destroys = log.borrow().iter().filter(|l| l.ends_with(":destroy")).count();
        assert_eq!(destroys, 2);
        assert_eq!(d.ticking(), 0);
        assert_eq!(d.current(), None);
        assert!(matches!(d.switch_to(b), Err(SceneError::Destroyed { .. })));
    }
}
