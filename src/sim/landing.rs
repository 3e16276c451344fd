//! Landing outcome classification

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::ContactPoint;
use crate::config::SimulationConfig;

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Safe,
    /// Came down too fast
    CrashExcessVertical,
    /// Drifting sideways too fast
    CrashExcessHorizontal,
    /// Slow enough, but not on level ground
    CrashUnevenContact,
    /// Left the playable envelope before touchdown
    OutOfRange,
}

impl Outcome {
    pub fn is_crash(&self) -> bool {
        matches!(
            self,
            Outcome::CrashExcessVertical | Outcome::CrashExcessHorizontal | Outcome::CrashUnevenContact
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Safe => "safe",
            Outcome::CrashExcessVertical => "crash (vertical speed)",
            Outcome::CrashExcessHorizontal => "crash (horizontal speed)",
            Outcome::CrashUnevenContact => "crash (uneven ground)",
            Outcome::OutOfRange => "out of range",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if every contact point sits at the same ground height
pub fn landed_flat(contacts: &[ContactPoint]) -> bool {
    contacts.windows(2).all(|pair| pair[0].ground_y == pair[1].ground_y)
}

/// Classify a touchdown from its contact points and final velocity.
///
/// A crash is attributed to vertical speed first, then horizontal speed, and
/// only then to uneven ground.
pub fn evaluate(contacts: &[ContactPoint], vel: Vec2, config: &SimulationConfig) -> Outcome {
    let too_fast_v = vel.y.abs() > config.max_landing_vy;
    let too_fast_h = vel.x.abs() > config.max_landing_vx;

    if too_fast_v {
        Outcome::CrashExcessVertical
    } else if too_fast_h {
        Outcome::CrashExcessHorizontal
    } else if !landed_flat(contacts) {
        Outcome::CrashUnevenContact
    } else {
        Outcome::Safe
    }
}
