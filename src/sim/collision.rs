//! Contact detection between the lander footprint and the ground polyline
//!
//! The footprint is the segment [x - w/2, x + w/2] at the lander's base. Ground
//! height is interpolated under its left edge, center and right edge; any
//! profile vertex strictly inside the footprint is sampled as well.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;

/// A ground sample under the footprint at touchdown-test time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    pub x: f32,
    /// Ground height rounded to whole display units
    pub ground_y: i32,
}

/// Result of a contact test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    /// Whether the lander is on (or below) the ground
    pub touched_down: bool,
    /// Ground samples under the footprint, left to right
    pub contact_points: Vec<ContactPoint>,
    /// Ground height under the lander center, if it is over the terrain
    pub center_ground: Option<f32>,
}

impl ContactReport {
    /// Height the wreck should settle to
    pub fn settle_height(&self) -> f32 {
        self.center_ground.unwrap_or(0.0).max(0.0)
    }
}

/// Test the lander at `pos` (bottom-center) against `terrain`
pub fn detect(pos: Vec2, vehicle_width: f32, terrain: &Terrain) -> ContactReport {
    let left = pos.x - vehicle_width / 2.0;
    let right = pos.x + vehicle_width / 2.0;
    let mut report = ContactReport::default();

    let sample = |report: &mut ContactReport, x: f32, ground: f32| {
        report.contact_points.push(ContactPoint {
            x,
            ground_y: ground.round() as i32,
        });
        if pos.y <= ground {
            report.touched_down = true;
        }
    };

    if let Some(ground) = terrain.ground_height_at(left) {
        sample(&mut report, left, ground);
    }

    for p in &terrain.profile {
        let px = p.x as f32;
        if px >= right {
            break;
        }
        if px > left {
            sample(&mut report, px, p.y as f32);
        }
    }

    if let Some(ground) = terrain.ground_height_at(right) {
        sample(&mut report, right, ground);
    }

    report.center_ground = terrain.ground_height_at(pos.x);
    if report.center_ground.is_some_and(|ground| pos.y <= ground) {
        report.touched_down = true;
    }

    if pos.y <= 0.0 {
        report.touched_down = true;
    }

    report
}
