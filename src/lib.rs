//! Lunar Lander - A 2D lunar landing arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, contact, flight phases)
//! - `config`: Per-episode simulation configuration
//! - `report`: Outcome messages for the presentation layer
//!
//! Rendering, input capture and frame pacing are left to the caller, which
//! feeds resolved [`sim::ControlInputs`] into [`sim::Episode::advance`] once per frame.

pub mod config;
pub mod error;
pub mod report;
pub mod sim;

pub use config::SimulationConfig;
pub use error::ConfigError;

/// Game configuration constants
pub mod consts {
    /// Interior terrain points across the viewport (including both end points)
    pub const CRG_POINTS: usize = 31;
    /// Landing pad size in terrain segments
    pub const PAD_SIZE: usize = 4;
    /// Maximum y-variation between consecutive terrain points
    pub const CRG_STEEPNESS: i32 = 25;
    /// Lowest permitted ground height (display units above the bottom edge)
    pub const MIN_GROUND_HEIGHT: i32 = 5;
    /// Terrain ceiling is viewport height divided by this
    pub const MAX_HEIGHT_DIVISOR: i32 = 6;
    /// Largest viewport dimension, so display units fit an `i32`
    pub const MAX_VIEWPORT: u32 = i32::MAX as u32;

    /// Meters spanned between the pad and the top of the vehicle at the top edge
    pub const SCALE_REFERENCE_M: f32 = 1200.0;
    /// Spawn altitude above the pad (meters)
    pub const SPAWN_ALTITUDE_M: f32 = 1000.0;

    /// Out-of-range envelope (meters, relative to the pad)
    pub const MAX_ALTITUDE_M: f32 = 5000.0;
    pub const MIN_ALTITUDE_M: f32 = -500.0;
    pub const MAX_LATERAL_M: f32 = 1000.0;

    /// Ticks observed by the timing calibrator
    pub const TIMING_TICKS: u32 = 10;
    /// Simulated seconds per wall-clock second once calibrated
    pub const TIMING_SCALE: f32 = 7.5;

    /// Number of frames in the explosion sequence
    pub const EXPL_SEQUENCE: u32 = 10;
    /// Ticks each explosion frame is shown for
    pub const EXPL_FRAME_TICKS: u32 = 2;
    /// Alternating two-frame tail after the main sequence
    pub const EXPL_TAIL_TICKS: u32 = 12;
}
