//! Lander state and flight phase types
//!
//! Everything the flight state machine mutates lives here, including the
//! per-phase counters, so a snapshot is a complete description of an episode.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::ContactReport;
use super::landing::Outcome;
use super::terrain::Terrain;
use super::timing::TimingCalibrator;
use crate::config::SimulationConfig;
use crate::consts::*;

/// Thruster commands for a single tick, already resolved by the input layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInputs {
    /// Main (downward) engine
    pub main: bool,
    /// Left-side attitude thruster (pushes the lander right)
    pub left: bool,
    /// Right-side attitude thruster (pushes the lander left)
    pub right: bool,
}

impl ControlInputs {
    pub const IDLE: Self = Self {
        main: false,
        left: false,
        right: false,
    };

    /// True if any control is held
    pub fn any(&self) -> bool {
        self.main || self.left || self.right
    }

    /// Map controls onto thrusters, swapping the side thrusters when `reverse` is set
    pub fn mapped(self, reverse: bool) -> Self {
        if reverse {
            Self {
                main: self.main,
                left: self.right,
                right: self.left,
            }
        } else {
            self
        }
    }

    /// Number of attitude thrusters firing
    pub fn attitude_count(&self) -> u32 {
        self.left as u32 + self.right as u32
    }
}

/// Position, velocity and fuel of the lander
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LanderState {
    /// Bottom-center of the lander in display units (y up)
    pub pos: Vec2,
    /// Velocity in m/s (positive y is up)
    pub vel: Vec2,
    /// Remaining fuel (kg), never negative
    pub fuel: f32,
    /// Current tick interval (s)
    pub dt: f32,
}

impl LanderState {
    /// Lander at rest above the pad center with a full tank
    pub fn spawn(terrain: &Terrain, config: &SimulationConfig, dt: f32) -> Self {
        Self {
            pos: Vec2::new(
                terrain.pad_center_x(),
                SPAWN_ALTITUDE_M / terrain.scale_factor + terrain.ground_zero as f32,
            ),
            vel: Vec2::ZERO,
            fuel: config.initial_fuel,
            dt,
        }
    }

    /// Total mass including remaining fuel (kg)
    pub fn mass(&self, config: &SimulationConfig) -> f32 {
        config.dry_mass + self.fuel
    }

    /// Height above the pad in meters
    pub fn altitude_m(&self, terrain: &Terrain) -> f32 {
        (self.pos.y - terrain.ground_zero as f32) * terrain.scale_factor
    }

    /// Horizontal distance from the pad center in meters (positive = right)
    pub fn lateral_offset_m(&self, terrain: &Terrain) -> f32 {
        (self.pos.x - terrain.pad_center_x()) * (terrain.scale_factor / 2.0)
    }

    /// True once the lander has left the playable envelope
    pub fn out_of_range(&self, terrain: &Terrain) -> bool {
        let altitude = self.altitude_m(terrain);
        altitude > MAX_ALTITUDE_M
            || altitude < MIN_ALTITUDE_M
            || self.lateral_offset_m(terrain).abs() > MAX_LATERAL_M
    }
}

/// Current phase of an episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightPhase {
    /// Fresh terrain; lander is placed on the next tick
    New,
    /// Measuring host frame time to fix `dt`
    Timing(TimingCalibrator),
    /// Same terrain, lander is reset on the next tick
    Restart,
    /// Waiting for the first control input
    Hold,
    /// Lander is in flight
    Active,
    /// Lander left the envelope
    OutOfRange,
    /// Touched down, landing not yet judged
    EndGame,
    /// Landed safely
    Safe,
    /// Crash sequence: settle onto the ground
    Crash1 { outcome: Outcome },
    Crash2 { outcome: Outcome },
    Crash3 { outcome: Outcome },
    /// Explosion animation; `count` ticks already shown
    Explode { count: u32, outcome: Outcome },
    /// Episode over
    Inactive { outcome: Outcome },
}

impl FlightPhase {
    /// Whether the lander moves this phase
    pub fn in_flight(&self) -> bool {
        matches!(self, FlightPhase::Active)
    }

    /// Whether the episode has reached its final outcome
    pub fn is_finished(&self) -> bool {
        matches!(self, FlightPhase::Inactive { .. })
    }
}

/// Which lander image the presentation layer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sprite {
    #[default]
    Lander,
    Crash1,
    Crash2,
    Crash3,
    /// Explosion frame index (0-based)
    Explosion(u8),
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightEvent {
    /// Timing calibration finished with this tick interval
    Calibrated { dt: f32 },
    /// Lander touched the ground
    Touchdown,
    /// Lander left the playable envelope
    OutOfRange,
    /// Episode ended with this outcome
    OutcomeFinalized { outcome: Outcome },
}

/// Everything the flight state machine owns for one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub(crate) lander: LanderState,
    pub(crate) phase: FlightPhase,
    pub(crate) sprite: Sprite,
    /// Thrusters fired on the last tick (after reverse mapping)
    pub(crate) thrusters: ControlInputs,
    /// Most recent contact test
    pub(crate) contact: ContactReport,
    /// Ticks applied since the episode was created
    pub(crate) time_ticks: u64,
}

impl FlightState {
    /// Fresh state in `phase` with the lander as given
    pub fn new(lander: LanderState, phase: FlightPhase) -> Self {
        Self {
            lander,
            phase,
            sprite: Sprite::Lander,
            thrusters: ControlInputs::IDLE,
            contact: ContactReport::default(),
            time_ticks: 0,
        }
    }

    pub fn lander(&self) -> &LanderState {
        &self.lander
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    /// Sprite the renderer should draw this frame
    pub fn sprite(&self) -> Sprite {
        self.sprite
    }

    /// Thrusters whose flames should be drawn (only while in flight with fuel)
    pub fn thrusters(&self) -> ControlInputs {
        if self.phase.in_flight() && self.lander.fuel > 0.0 {
            self.thrusters
        } else {
            ControlInputs::IDLE
        }
    }

    pub fn contact(&self) -> &ContactReport {
        &self.contact
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Final outcome, once the episode is over
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            FlightPhase::Inactive { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Put the lander back on its start position with a full tank, keeping `dt`
    pub(crate) fn reset_lander(&mut self, terrain: &Terrain, config: &SimulationConfig) {
        self.lander = LanderState::spawn(terrain, config, self.lander.dt);
        self.sprite = Sprite::Lander;
        self.thrusters = ControlInputs::IDLE;
        self.contact = ContactReport::default();
    }
}
