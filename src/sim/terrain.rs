//! Procedural terrain with a flat landing pad
//!
//! Heights are display units measured up from the bottom edge of the viewport.
//! The ground is a random walk that reflects off the band edges instead of
//! clamping, so consecutive points never differ by more than the steepness bound.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::consts::*;

/// A terrain vertex in display units (y up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: i32,
    pub y: i32,
}

impl GroundPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Ground profile plus the landing pad and altitude scale derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    /// Seed the terrain was generated from
    pub seed: u64,
    /// Interior ground points, x strictly increasing from 0 to `width`
    pub profile: Vec<GroundPoint>,
    /// First profile index of the pad
    pub pad_start: usize,
    /// Last profile index of the pad (inclusive)
    pub pad_end: usize,
    /// Pad surface height (display units)
    pub ground_zero: i32,
    /// Meters per vertical display unit
    pub scale_factor: f32,
    pub width: i32,
    pub height: i32,
}

impl Terrain {
    /// Closed ground polygon for rendering: a bottom corner, the profile, the other bottom corner
    pub fn outline(&self) -> Vec<GroundPoint> {
        let mut outline = Vec::with_capacity(self.profile.len() + 2);
        outline.push(GroundPoint::new(0, 0));
        outline.extend_from_slice(&self.profile);
        outline.push(GroundPoint::new(self.width, 0));
        outline
    }

    /// Profile points making up the landing pad
    pub fn pad(&self) -> &[GroundPoint] {
        &self.profile[self.pad_start..=self.pad_end]
    }

    /// Horizontal center of the pad (display units)
    pub fn pad_center_x(&self) -> f32 {
        (self.profile[self.pad_start].x + self.profile[self.pad_end].x) as f32 / 2.0
    }

    /// Interpolated ground height at `x`, or `None` outside the profile
    pub fn ground_height_at(&self, x: f32) -> Option<f32> {
        self.profile.windows(2).find_map(|seg| {
            let (a, b) = (seg[0], seg[1]);
            if (a.x as f32) <= x && x <= (b.x as f32) {
                let t = (x - a.x as f32) / (b.x - a.x) as f32;
                Some(a.y as f32 + (b.y - a.y) as f32 * t)
            } else {
                None
            }
        })
    }
}

/// Generate terrain for `config` from `seed`.
///
/// The same seed and config always give the same terrain. Callers are expected
/// to have validated `config`; generation itself cannot fail.
pub fn generate(seed: u64, config: &SimulationConfig) -> Terrain {
    let mut rng = Pcg32::seed_from_u64(seed);

    let (width, height) = config.viewport_size();
    let max_height = config.max_ground_height();
    let segments = (CRG_POINTS - 1) as i32;

    // 1-based pad start in [1, CRG_POINTS - PAD_SIZE]
    let pad_start = rng.random_range(1..=CRG_POINTS - PAD_SIZE) - 1;
    let pad_end = pad_start + PAD_SIZE;

    // Integer width per segment; the remainder is spread so the last point lands on `width`
    let inc = width / segments;
    let inc_extra = width % segments;

    let mut y = rng.random_range(MIN_GROUND_HEIGHT + 1..max_height);
    let mut ground_zero = y;
    let mut profile = Vec::with_capacity(CRG_POINTS);

    for i in 0..CRG_POINTS {
        let n = i as i32;
        let x = n * inc + (n * inc_extra) / segments;
        profile.push(GroundPoint::new(x, y));

        if i == pad_start {
            ground_zero = y;
        }
        if i < pad_start || i >= pad_end {
            let dy = rng.random_range(-CRG_STEEPNESS..=CRG_STEEPNESS);
            if y + dy > MIN_GROUND_HEIGHT && y + dy < max_height {
                y += dy;
            } else {
                y -= dy;
            }
        }
    }

    let scale_factor = SCALE_REFERENCE_M / (height as f32 - ground_zero as f32 - config.vehicle_height);

    log::debug!(
        "Terrain seed {}: pad {}..={} at height {}, scale {:.3} m/unit",
        seed,
        pad_start,
        pad_end,
        ground_zero,
        scale_factor
    );

    Terrain {
        seed,
        profile,
        pad_start,
        pad_end,
        ground_zero,
        scale_factor,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_outline_closes_polygon() {
        let config = SimulationConfig::default();
        let terrain = generate(42, &config);
        let outline = terrain.outline();

        assert_eq!(terrain.profile.len(), CRG_POINTS);
        assert_eq!(outline.len(), CRG_POINTS + 2);
        assert_eq!(outline[0], GroundPoint::new(0, 0));
        assert_eq!(outline[outline.len() - 1], GroundPoint::new(800, 0));
        assert_eq!(outline[1].x, 0);
        assert_eq!(outline[outline.len() - 2].x, 800);
    }

    #[test]
    fn test_widths_sum_to_viewport() {
        // 815 does not divide evenly into 30 segments
        let config = SimulationConfig {
            viewport_width: 815,
            ..Default::default()
        };
        let terrain = generate(7, &config);
        assert_eq!(terrain.profile.first().map(|p| p.x), Some(0));
        assert_eq!(terrain.profile.last().map(|p| p.x), Some(815));
        for seg in terrain.profile.windows(2) {
            let w = seg[1].x - seg[0].x;
            assert!(w == 27 || w == 28, "segment width {}", w);
        }
    }

    #[test]
    fn test_pad_spans_pad_size_segments() {
        let config = SimulationConfig::default();
        for seed in 0..50 {
            let terrain = generate(seed, &config);
            assert_eq!(terrain.pad_end - terrain.pad_start, PAD_SIZE);
            assert!(terrain.pad_end < CRG_POINTS);
            assert_eq!(terrain.pad().len(), PAD_SIZE + 1);
        }
    }

    #[test]
    fn test_scale_factor_from_ground_zero() {
        let config = SimulationConfig::default();
        let terrain = generate(1234, &config);
        let expected = 1200.0 / (500.0 - terrain.ground_zero as f32 - 48.0);
        assert!((terrain.scale_factor - expected).abs() < 1e-6);
        assert!(terrain.scale_factor > 0.0);
    }

    #[test]
    fn test_ground_height_interpolates() {
        let terrain = Terrain {
            seed: 0,
            profile: vec![
                GroundPoint::new(0, 10),
                GroundPoint::new(10, 30),
                GroundPoint::new(20, 30),
            ],
            pad_start: 1,
            pad_end: 2,
            ground_zero: 30,
            scale_factor: 1.0,
            width: 20,
            height: 100,
        };
        assert_eq!(terrain.ground_height_at(5.0), Some(20.0));
        assert_eq!(terrain.ground_height_at(15.0), Some(30.0));
        assert_eq!(terrain.ground_height_at(20.0), Some(30.0));
        assert_eq!(terrain.ground_height_at(-1.0), None);
        assert_eq!(terrain.ground_height_at(21.0), None);
        assert!((terrain.pad_center_x() - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = SimulationConfig::default();
        let a = generate(1, &config);
        let b = generate(2, &config);
        assert_ne!(a.profile, b.profile);
    }

    proptest! {
        #[test]
        fn prop_x_strictly_increasing(seed in any::<u64>()) {
            let config = SimulationConfig::default();
            let terrain = generate(seed, &config);
            prop_assert_eq!(terrain.profile[0].x, 0);
            prop_assert_eq!(terrain.profile[CRG_POINTS - 1].x, terrain.width);
            for seg in terrain.profile.windows(2) {
                prop_assert!(seg[0].x < seg[1].x);
            }
        }

        #[test]
        fn prop_pad_flat_and_walk_bounded(seed in any::<u64>(), height in 336u32..1200) {
            let config = SimulationConfig {
                viewport_height: height,
                ..Default::default()
            };
            let terrain = generate(seed, &config);
            let max_height = config.max_ground_height();

            for p in terrain.pad() {
                prop_assert_eq!(p.y, terrain.ground_zero);
            }
            for (i, seg) in terrain.profile.windows(2).enumerate() {
                let dy = (seg[1].y - seg[0].y).abs();
                if i >= terrain.pad_start && i < terrain.pad_end {
                    prop_assert_eq!(dy, 0);
                } else {
                    prop_assert!(dy <= CRG_STEEPNESS);
                }
            }
            for p in &terrain.profile {
                prop_assert!(p.y > MIN_GROUND_HEIGHT && p.y < max_height, "height {} out of band", p.y);
            }
        }

        #[test]
        fn prop_deterministic(seed in any::<u64>()) {
            let config = SimulationConfig::default();
            let a = generate(seed, &config);
            let b = generate(seed, &config);
            prop_assert_eq!(&a, &b);
            let json_a = serde_json::to_string(&a).expect("serialize");
            let json_b = serde_json::to_string(&b).expect("serialize");
            prop_assert_eq!(json_a, json_b);
        }
    }
}
