use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use tableau_engine::coords::Viewport;
use tableau_engine::logging::{init_logging, LoggingConfig};
use tableau_engine::scene::{SceneDirector, SceneId};
use tableau_engine::surface::HeadlessSurface;
use tableau_engine::time::{FpsMeter, FrameClock};
use tableau_scenes::{AceConfig, AceOfShadows};

/// Run parameters for the headless studio.
#[derive(Debug, Clone)]
struct StudioConfig {
    viewport: Viewport,
    run_for: Duration,
    /// Viewport applied halfway through the run.
    resize_to: Option<Viewport>,
    frame_interval: Duration,
    scene: AceConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1280.0, 720.0),
            run_for: Duration::from_secs(6),
            resize_to: Some(Viewport::new(960.0, 640.0)),
            frame_interval: Duration::from_micros(16_667),
            scene: AceConfig::default(),
        }
    }
}

impl StudioConfig {
    fn run_for(mut self, d: Duration) -> Self {
        self.run_for = d;
        self
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = match std::env::var("TABLEAU_RUN_SECS") {
        Ok(secs) => {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("TABLEAU_RUN_SECS must be whole seconds, got '{secs}'"))?;
            StudioConfig::default().run_for(Duration::from_secs(secs))
        }
        Err(_) => StudioConfig::default(),
    };

    run(config)
}

fn run(config: StudioConfig) -> Result<()> {
    log::info!(
        "tableau studio: {}x{} for {:?}",
        config.viewport.width,
        config.viewport.height,
        config.run_for
    );

    let mut director = SceneDirector::new(HeadlessSurface::new(), config.viewport);
    let ace = director.add_scene(Box::new(AceOfShadows::new(config.scene.clone())));
    director.switch_to(ace).context("failed to activate the card scene")?;

    let mut clock = FrameClock::new();
    let mut fps = FpsMeter::new();
    let started = Instant::now();
    let mut resize_pending = config.resize_to;
    let mut last_report = started;

    while started.elapsed() < config.run_for {
        std::thread::sleep(config.frame_interval);

        let frame = clock.tick();
        let delta = frame.frame_units();
        fps.update(delta);
        director.tick(delta);

        if started.elapsed() >= config.run_for / 2 {
            if let Some(vp) = resize_pending.take() {
                log::info!("resizing to {}x{}", vp.width, vp.height);
                director.resize(vp.width, vp.height);
            }
        }

        if last_report.elapsed() >= Duration::from_secs(1) {
            last_report = Instant::now();
            report(&director, ace, fps.fps());
        }
    }

    director.shutdown();
    log::info!("done; {} visuals still alive on the surface", director.surface().live_visuals());
    Ok(())
}

fn report(director: &SceneDirector<HeadlessSurface>, id: SceneId, fps: u32) {
    let Some(scene) = director
        .scene(id)
        .and_then(|s| s.as_any().downcast_ref::<AceOfShadows>())
    else {
        return;
    };
    let Some(c) = scene.controller() else {
        return;
    };
    log::info!(
        "FPS: {fps}  left: {}  moving: {}  right: {}",
        c.left_count(),
        c.animating_count(),
        c.right_count()
    );
}
