//! Time subsystem.
//!
//! Provides frame timing and the per-frame ticker without coupling to any
//! windowing runtime.
//! - one `FrameClock` per loop; call `tick()` once per frame to obtain `FrameTime`
//! - one `Ticker` shared by every scene that wants per-frame updates
//!
//! Scenes receive deltas in *frame units*: one unit is one frame at
//! [`NOMINAL_FPS`]. Use [`frame_units_to_ms`] to convert.

mod fps;
mod frame_clock;
mod ticker;

pub use fps::FpsMeter;
pub use frame_clock::{FrameClock, FrameTime};
pub use ticker::{Ticker, TickerToken};

/// Nominal frame rate that defines one frame unit.
pub const NOMINAL_FPS: f32 = 60.0;

/// Converts a frame-unit delta into milliseconds.
#[inline]
pub fn frame_units_to_ms(delta: f32) -> f32 {
    // Multiply first so whole-second deltas (e.g. 60 units) stay exact.
    delta * 1000.0 / NOMINAL_FPS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_second_of_units_is_exactly_1000_ms() {
        assert_eq!(frame_units_to_ms(60.0), 1000.0);
        assert_eq!(frame_units_to_ms(120.0), 2000.0);
    }

    #[test]
    fn single_frame_is_about_16_67_ms() {
        assert!((frame_units_to_ms(1.0) - 16.666_666).abs() < 1e-4);
    }
}
