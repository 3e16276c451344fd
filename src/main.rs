//! Lunar Lander entry point
//!
//! Runs one headless episode with a simple descent autopilot and prints the
//! outcome. Usage: `lunar-lander [SEED] [CONFIG.json]`

use std::process::ExitCode;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use lunar_lander::report;
use lunar_lander::sim::{ControlInputs, Episode, FlightEvent, FlightPhase, LanderState, Terrain};
use lunar_lander::{ConfigError, SimulationConfig};

/// Host frame interval fed to the simulation
const FRAME_DT: f32 = 0.05;
/// Give up after this many frames
const MAX_FRAMES: u32 = 200_000;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lunar Lander (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ConfigError> {
    let mut args = std::env::args().skip(1);

    let seed = match args.next() {
        Some(arg) => arg.parse::<u64>().unwrap_or_else(|_| {
            log::warn!("Invalid seed '{}', picking a random one", arg);
            rand::random()
        }),
        None => rand::random(),
    };
    let config = match args.next() {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let mut episode = Episode::new(config, seed)?;
    println!("Seed {}: pad at x = {:.0}", seed, episode.terrain().pad_center_x());

    let mut outcome = None;
    for _ in 0..MAX_FRAMES {
        let controls = autopilot(&episode);
        for event in episode.advance(controls, FRAME_DT) {
            match event {
                FlightEvent::Calibrated { dt } => println!("Tick interval calibrated to {:.3} s", dt),
                FlightEvent::Touchdown => {
                    let vel = episode.lander().vel;
                    println!("Touchdown at vx = {:.2} m/s, vy = {:.2} m/s", vel.x, vel.y);
                }
                FlightEvent::OutOfRange => println!("Lost contact"),
                FlightEvent::OutcomeFinalized { outcome: finished } => outcome = Some(finished),
            }
        }
        if episode.phase().is_finished() {
            break;
        }
    }

    match outcome {
        Some(outcome) => {
            let mut rng = Pcg32::seed_from_u64(seed);
            let variant = report::pick_variant(outcome, &mut rng);
            println!(
                "{} after {} ticks, {:.0} kg fuel left",
                outcome,
                episode.flight().time_ticks(),
                episode.lander().fuel
            );
            println!("{}", report::outcome_message(outcome, variant));
            if report::is_success(outcome) {
                println!("Mission accomplished");
            } else if outcome.is_crash() {
                println!("Vehicle lost");
            }
        }
        None => println!("Episode did not finish within {} frames", MAX_FRAMES),
    }
    Ok(())
}

/// Descend at a speed proportional to altitude and null out lateral drift
fn autopilot(episode: &Episode) -> ControlInputs {
    match episode.phase() {
        // Any input releases the hold
        FlightPhase::Hold => ControlInputs {
            main: true,
            ..ControlInputs::IDLE
        },
        FlightPhase::Active => steer(episode.lander(), episode.terrain())
            .mapped(episode.config().reverse_attitude),
        _ => ControlInputs::IDLE,
    }
}

/// Thrusters to fire, before the configured attitude swap is applied
fn steer(lander: &LanderState, terrain: &Terrain) -> ControlInputs {
    let altitude = lander.altitude_m(terrain);
    let target_vy = -(2.0 + altitude / 25.0).min(40.0);
    let offset = lander.lateral_offset_m(terrain);
    let target_vx = (-offset / 20.0).clamp(-0.5, 0.5);

    ControlInputs {
        main: lander.vel.y < target_vy,
        left: lander.vel.x < target_vx - 0.2,
        right: lander.vel.x > target_vx + 0.2,
    }
}
