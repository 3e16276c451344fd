//! Startup timing calibration
//!
//! Watches the first few frames of a new episode and converts the host's
//! average frame time into a simulation step, so the game plays at the same
//! speed whatever the redraw rate.

use serde::{Deserialize, Serialize};

use crate::consts::{TIMING_SCALE, TIMING_TICKS};

/// Accumulates wall-clock time across calibration ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingCalibrator {
    /// Ticks observed so far
    pub ticks: u32,
    /// Wall-clock seconds accumulated over those ticks
    pub elapsed: f32,
}

impl TimingCalibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame. Returns the calibrated `dt` once enough ticks have been seen.
    ///
    /// Negative or non-finite deltas count as a tick with no elapsed time.
    pub fn observe(&mut self, wall_dt: f32) -> Option<f32> {
        if wall_dt.is_finite() && wall_dt > 0.0 {
            self.elapsed += wall_dt;
        }
        self.ticks += 1;

        if self.ticks >= TIMING_TICKS {
            Some(TIMING_SCALE * self.elapsed / self.ticks as f32)
        } else {
            None
        }
    }
}
