use std::time::{Duration, Instant};

use super::NOMINAL_FPS;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// Delta expressed in frame units (`1.0` == one frame at the nominal rate).
    ///
    /// Skipped host frames show up as a larger value, never as extra ticks.
    #[inline]
    pub fn frame_units(&self) -> f32 {
        self.dt * NOMINAL_FPS
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the process is
/// paused by a debugger or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// - minimum prevents zero-dt behavior from tight loops
    /// - maximum keeps a long stall from teleporting every animation to its end
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min: Duration::from_micros(100), // 0.0001s
            dt_max: Duration::from_millis(250), // 0.25s
        }
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Useful when a loop resumes after being idle.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_respects_clamps_and_counts_frames() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));

        let first = clock.tick();
        let second = clock.tick();

        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!(second.dt >= 0.005 - 1e-6 && second.dt <= 0.010 + 1e-6);
    }

    #[test]
    fn frame_units_use_nominal_rate() {
        let ft = FrameTime {
            dt: 0.5,
            now: Instant::now(),
            frame_index: 0,
        };
        assert_eq!(ft.frame_units(), 30.0);
    }
}
