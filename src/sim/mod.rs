//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick interval comes from the caller or the timing calibrator, never the clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod landing;
pub mod physics;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod timing;

pub use collision::{ContactPoint, ContactReport, detect};
pub use landing::{Outcome, evaluate, landed_flat};
pub use physics::integrate;
pub use state::{ControlInputs, FlightEvent, FlightPhase, FlightState, LanderState, Sprite};
pub use terrain::{GroundPoint, Terrain, generate};
pub use tick::{Episode, advance_tick, explosion_frame, new_episode, retry_episode};
pub use timing::TimingCalibrator;
