//! Flight state machine
//!
//! One call to [`advance_tick`] per presentation frame. Each phase does its
//! work for the tick and picks the next phase; nothing blocks or sleeps.

use std::sync::Arc;

use super::collision::detect;
use super::landing::{Outcome, evaluate};
use super::physics::integrate;
use super::state::{ControlInputs, FlightEvent, FlightPhase, FlightState, LanderState, Sprite};
use super::terrain::{Terrain, generate};
use super::timing::TimingCalibrator;
use crate::config::SimulationConfig;
use crate::consts::*;
use crate::error::ConfigError;

/// Advance the episode by one tick.
///
/// `controls` are the raw input-layer controls; reverse attitude mapping is
/// applied here and nowhere else. `wall_dt` is the wall-clock time since the
/// previous frame in seconds and only matters while timing is calibrated.
pub fn advance_tick(
    flight: &mut FlightState,
    terrain: &Terrain,
    config: &SimulationConfig,
    controls: ControlInputs,
    wall_dt: f32,
) -> Vec<FlightEvent> {
    let mut events = Vec::new();
    flight.time_ticks += 1;

    let next = match flight.phase {
        FlightPhase::New => {
            flight.lander.dt = config.initial_dt;
            flight.reset_lander(terrain, config);
            if config.calibrate_timing {
                FlightPhase::Timing(TimingCalibrator::new())
            } else {
                FlightPhase::Hold
            }
        }

        FlightPhase::Timing(mut timing) => match timing.observe(wall_dt) {
            Some(dt) if dt.is_finite() && dt > 0.0 => {
                log::info!("Timing calibrated: dt = {:.4}s over {} ticks", dt, timing.ticks);
                flight.lander.dt = dt;
                events.push(FlightEvent::Calibrated { dt });
                FlightPhase::Hold
            }
            Some(dt) => {
                log::warn!(
                    "Timing calibration gave unusable dt {}, keeping {}s",
                    dt,
                    flight.lander.dt
                );
                FlightPhase::Hold
            }
            None => FlightPhase::Timing(timing),
        },

        FlightPhase::Restart => {
            flight.reset_lander(terrain, config);
            FlightPhase::Hold
        }

        FlightPhase::Hold => {
            if controls.any() {
                FlightPhase::Active
            } else {
                FlightPhase::Hold
            }
        }

        FlightPhase::Active => {
            flight.thrusters = controls.mapped(config.reverse_attitude);
            integrate(&mut flight.lander, &flight.thrusters, config, terrain.scale_factor);
            flight.contact = detect(flight.lander.pos, config.vehicle_width, terrain);

            if flight.contact.touched_down {
                log::debug!(
                    "Touchdown at ({:.1}, {:.1}) with v = ({:.2}, {:.2})",
                    flight.lander.pos.x,
                    flight.lander.pos.y,
                    flight.lander.vel.x,
                    flight.lander.vel.y
                );
                events.push(FlightEvent::Touchdown);
                FlightPhase::EndGame
            } else if flight.lander.out_of_range(terrain) {
                FlightPhase::OutOfRange
            } else {
                FlightPhase::Active
            }
        }

        FlightPhase::OutOfRange => {
            flight.thrusters = ControlInputs::IDLE;
            events.push(FlightEvent::OutOfRange);
            finish(&mut events, Outcome::OutOfRange)
        }

        FlightPhase::EndGame => {
            flight.thrusters = ControlInputs::IDLE;
            match evaluate(&flight.contact.contact_points, flight.lander.vel, config) {
                Outcome::Safe => FlightPhase::Safe,
                outcome => FlightPhase::Crash1 { outcome },
            }
        }

        FlightPhase::Safe => finish(&mut events, Outcome::Safe),

        FlightPhase::Crash1 { outcome } => {
            let floor = flight.contact.settle_height();
            if flight.lander.pos.y > floor {
                flight.lander.pos.y = floor;
            }
            flight.sprite = Sprite::Crash1;
            FlightPhase::Crash2 { outcome }
        }

        FlightPhase::Crash2 { outcome } => {
            flight.sprite = Sprite::Crash2;
            FlightPhase::Crash3 { outcome }
        }

        FlightPhase::Crash3 { outcome } => {
            flight.sprite = Sprite::Crash3;
            FlightPhase::Explode { count: 0, outcome }
        }

        FlightPhase::Explode { count, outcome } => match explosion_frame(count) {
            Some(frame) => {
                flight.sprite = Sprite::Explosion(frame);
                FlightPhase::Explode {
                    count: count + 1,
                    outcome,
                }
            }
            None => {
                flight.sprite = Sprite::Crash3;
                finish(&mut events, outcome)
            }
        },

        FlightPhase::Inactive { outcome } => FlightPhase::Inactive { outcome },
    };

    if std::mem::discriminant(&next) != std::mem::discriminant(&flight.phase) {
        log::debug!("Phase {:?} -> {:?}", flight.phase, next);
    }
    flight.phase = next;
    events
}

/// Explosion frame to show on tick `count` of the sequence, or `None` once it is over.
///
/// Each of the frames is held for two ticks, then the last two alternate for the tail.
pub fn explosion_frame(count: u32) -> Option<u8> {
    let main = EXPL_SEQUENCE * EXPL_FRAME_TICKS;
    if count < main {
        Some((count / EXPL_FRAME_TICKS) as u8)
    } else if count < main + EXPL_TAIL_TICKS {
        let last = (EXPL_SEQUENCE - 1) as u8;
        Some(if count % 2 == 0 { last } else { last - 1 })
    } else {
        None
    }
}

fn finish(events: &mut Vec<FlightEvent>, outcome: Outcome) -> FlightPhase {
    log::info!("Episode over: {}", outcome);
    events.push(FlightEvent::OutcomeFinalized { outcome });
    FlightPhase::Inactive { outcome }
}

/// An episode: shared read-only terrain and config, plus the flight state it drives
#[derive(Debug, Clone)]
pub struct Episode {
    config: Arc<SimulationConfig>,
    terrain: Arc<Terrain>,
    flight: FlightState,
}

impl Episode {
    /// Validate `config`, generate terrain from `seed`, and start in `New`
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let terrain = generate(seed, &config);
        let lander = LanderState::spawn(&terrain, &config, config.initial_dt);
        log::info!("New episode (seed {}), pad at x = {:.0}", seed, terrain.pad_center_x());

        Ok(Self {
            config: Arc::new(config),
            terrain: Arc::new(terrain),
            flight: FlightState::new(lander, FlightPhase::New),
        })
    }

    /// Fly the same terrain again: lander reset, timing kept, straight to `Hold`
    pub fn retry(&mut self) {
        log::info!("Retrying episode (seed {})", self.terrain.seed);
        let dt = self.flight.lander.dt;
        let lander = LanderState::spawn(&self.terrain, &self.config, dt);
        self.flight = FlightState::new(lander, FlightPhase::Restart);
        advance_tick(
            &mut self.flight,
            &self.terrain,
            &self.config,
            ControlInputs::IDLE,
            0.0,
        );
    }

    /// Ask for a restart on the next tick (same terrain)
    pub fn request_restart(&mut self) {
        self.flight.phase = FlightPhase::Restart;
    }

    /// Apply one presentation frame
    pub fn advance(&mut self, controls: ControlInputs, wall_dt: f32) -> Vec<FlightEvent> {
        advance_tick(&mut self.flight, &self.terrain, &self.config, controls, wall_dt)
    }

    pub fn config(&self) -> &Arc<SimulationConfig> {
        &self.config
    }

    pub fn terrain(&self) -> &Arc<Terrain> {
        &self.terrain
    }

    pub fn flight(&self) -> &FlightState {
        &self.flight
    }

    pub fn lander(&self) -> &LanderState {
        &self.flight.lander
    }

    pub fn phase(&self) -> FlightPhase {
        self.flight.phase
    }
}

/// Start a new episode on fresh terrain
pub fn new_episode(config: SimulationConfig, seed: u64) -> Result<Episode, ConfigError> {
    Episode::new(config, seed)
}

/// Copy of `existing` reset to fly its terrain again; the terrain is shared, not regenerated
pub fn retry_episode(existing: &Episode) -> Episode {
    let mut episode = existing.clone();
    episode.retry();
    episode
}
