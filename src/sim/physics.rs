//! Per-tick lander motion
//!
//! Semi-implicit Euler: velocity is updated first, then position uses the new
//! velocity. Position is in display units, so the vertical step is divided by
//! the terrain's meters-per-unit scale and the horizontal step by half of it
//! (the display compresses horizontal distance twice as much as vertical).

use glam::Vec2;

use super::state::{ControlInputs, LanderState};
use crate::config::SimulationConfig;

/// Acceleration (m/s²) the lander feels this tick
pub fn acceleration(lander: &LanderState, thrusters: &ControlInputs, config: &SimulationConfig) -> Vec2 {
    let mut accel = Vec2::new(0.0, -config.gravity);
    if lander.fuel > 0.0 {
        let mass = lander.mass(config);
        if thrusters.main {
            accel.y += config.main_force / mass;
        }
        if thrusters.left {
            accel.x += config.attitude_force / mass;
        }
        if thrusters.right {
            accel.x -= config.attitude_force / mass;
        }
    }
    accel
}

/// Fuel the thrusters want to burn over `dt` (kg), before clamping to what is left
pub fn fuel_demand(thrusters: &ControlInputs, config: &SimulationConfig, dt: f32) -> f32 {
    let mut rate = thrusters.attitude_count() as f32 * config.attitude_burn;
    if thrusters.main {
        rate += config.main_burn;
    }
    rate * dt
}

/// Advance the lander one tick of `lander.dt`.
///
/// `thrusters` are the already-mapped thruster flags. Thrust applies for the
/// whole tick as long as any fuel was left at its start; a tick that would
/// overdraw consumes exactly the remainder.
pub fn integrate(lander: &mut LanderState, thrusters: &ControlInputs, config: &SimulationConfig, scale_factor: f32) {
    let dt = lander.dt;
    let accel = acceleration(lander, thrusters, config);

    if lander.fuel > 0.0 {
        let burn = fuel_demand(thrusters, config, dt);
        lander.fuel = (lander.fuel - burn).max(0.0);
    }

    lander.vel += accel * dt;
    lander.pos.y += lander.vel.y * dt / scale_factor;
    lander.pos.x += lander.vel.x * dt / (scale_factor / 2.0);
}
