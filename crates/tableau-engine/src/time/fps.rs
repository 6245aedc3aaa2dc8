/// Frames-per-second estimate published over a fixed window of frame units.
///
/// Every frame adds its delta; once `window` units (default 30, half a second at
/// the nominal rate) have accumulated, the estimate is recomputed and the
/// window restarts.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frames: u32,
    elapsed: f32,
    window: f32,
    fps: u32,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::with_window(30.0)
    }

    pub fn with_window(window: f32) -> Self {
        Self {
            frames: 0,
            elapsed: 0.0,
            window,
            fps: 0,
        }
    }

    /// Records one frame. Returns `true` when a new estimate was published.
    pub fn update(&mut self, delta: f32) -> bool {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < self.window {
            return false;
        }

        self.fps = (self.frames as f32 * super::NOMINAL_FPS / self.elapsed).round() as u32;
        self.frames = 0;
        self.elapsed = 0.0;
        true
    }

    /// Last published estimate; `0` until the first window completes.
    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new()
    }
}
