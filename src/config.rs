//! Simulation configuration
//!
//! Immutable for the lifetime of an episode. Loaded from JSON on native
//! builds; any field missing from the file keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physical settings and options for one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Physics ===
    /// Gravity acceleration (m/s²)
    pub gravity: f32,
    /// Mass of the lander without fuel (kg)
    pub dry_mass: f32,
    /// Fuel at the start of an episode (kg)
    pub initial_fuel: f32,
    /// Main engine thrust (N)
    pub main_force: f32,
    /// Main engine fuel burn (kg/s)
    pub main_burn: f32,
    /// Attitude thruster force (N)
    pub attitude_force: f32,
    /// Attitude thruster fuel burn (kg/s, per thruster)
    pub attitude_burn: f32,

    // === Landing limits ===
    /// Max horizontal speed on landing (m/s)
    pub max_landing_vx: f32,
    /// Max vertical speed on landing (m/s)
    pub max_landing_vy: f32,

    // === Controls ===
    /// Swap which control fires which side thruster
    pub reverse_attitude: bool,

    // === Display ===
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Lander footprint width (display units)
    pub vehicle_width: f32,
    /// Lander height (display units)
    pub vehicle_height: f32,

    // === Timing ===
    /// Tick interval (s) used until calibration finishes, or always if it is disabled
    pub initial_dt: f32,
    /// Measure the host frame rate after a new episode starts
    pub calibrate_timing: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: 3.0,
            dry_mass: 1000.0,
            initial_fuel: 1000.0,
            main_force: 10000.0,
            main_burn: 10.0,
            attitude_force: 2000.0,
            attitude_burn: 2.0,

            max_landing_vx: 1.0,
            max_landing_vy: 10.0,

            reverse_attitude: false,

            viewport_width: 800,
            viewport_height: 500,
            vehicle_width: 60.0,
            vehicle_height: 48.0,

            initial_dt: 0.5,
            calibrate_timing: true,
        }
    }
}

impl SimulationConfig {
    /// Check every field that would make an episode meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gravity", self.gravity),
            ("dry_mass", self.dry_mass),
            ("main_force", self.main_force),
            ("attitude_force", self.attitude_force),
            ("max_landing_vx", self.max_landing_vx),
            ("max_landing_vy", self.max_landing_vy),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("initial_dt", self.initial_dt),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
            if value.is_infinite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in [
            ("initial_fuel", self.initial_fuel),
            ("main_burn", self.main_burn),
            ("attitude_burn", self.attitude_burn),
        ] {
            if value.is_infinite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if self.initial_fuel.is_nan() || self.initial_fuel < 0.0 {
            return Err(ConfigError::NegativeFuel {
                value: self.initial_fuel,
            });
        }
        for (field, value) in [("main_burn", self.main_burn), ("attitude_burn", self.attitude_burn)] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::NegativeBurnRate { field, value });
            }
        }

        let min_width = (CRG_POINTS - 1) as u32;
        if self.viewport_width < min_width {
            return Err(ConfigError::ViewportTooNarrow {
                width: self.viewport_width,
                min: min_width,
            });
        }

        for (field, value) in [("viewport_width", self.viewport_width), ("viewport_height", self.viewport_height)] {
            if value > MAX_VIEWPORT {
                return Err(ConfigError::ViewportTooLarge {
                    field,
                    value,
                    max: MAX_VIEWPORT,
                });
            }
        }

        let min_height = self.min_viewport_height();
        if self.viewport_height < min_height {
            return Err(ConfigError::ViewportTooShort {
                height: self.viewport_height,
                min: min_height,
            });
        }

        Ok(())
    }

    /// Smallest viewport height that leaves the terrain walk room to reflect
    /// and keeps the altitude scale factor positive.
    pub fn min_viewport_height(&self) -> u32 {
        // Walk band (MIN_GROUND_HEIGHT, height / 6) must be wider than two steps
        let band = (MAX_HEIGHT_DIVISOR * (MIN_GROUND_HEIGHT + 2 * CRG_STEEPNESS + 1)) as u32;
        // Pad height stays below height / 6, so the vehicle must fit in the rest.
        // The float-to-int cast saturates for oversized vehicles.
        let vehicle = (self.vehicle_height.max(0.0) * MAX_HEIGHT_DIVISOR as f32
            / (MAX_HEIGHT_DIVISOR - 1) as f32)
            .ceil() as u32;
        let vehicle = vehicle.saturating_add(1);
        band.max(vehicle)
    }

    /// Terrain ceiling in display units
    pub fn max_ground_height(&self) -> i32 {
        self.viewport_size().1 / MAX_HEIGHT_DIVISOR
    }

    /// Viewport width and height as signed display units, saturating at `MAX_VIEWPORT`
    pub fn viewport_size(&self) -> (i32, i32) {
        let clamp = |value: u32| i32::try_from(value.min(MAX_VIEWPORT)).unwrap_or(i32::MAX);
        (clamp(self.viewport_width), clamp(self.viewport_height))
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_ground_height(), 83);
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        let config = SimulationConfig {
            initial_dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "initial_dt",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_negative_fuel() {
        let config = SimulationConfig {
            initial_fuel: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NegativeFuel { .. })));

        // Zero fuel is a legal (if hopeless) episode
        let config = SimulationConfig {
            initial_fuel: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_mass_and_force() {
        let config = SimulationConfig {
            dry_mass: -5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "dry_mass", .. })
        ));

        let config = SimulationConfig {
            main_force: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "main_force", .. })
        ));
    }

    #[test]
    fn test_rejects_small_viewport() {
        let config = SimulationConfig {
            viewport_width: 20,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ViewportTooNarrow { width: 20, min: 30 })
        ));

        let config = SimulationConfig {
            viewport_height: 200,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ViewportTooShort { height: 200, .. })
        ));
    }

    #[test]
    fn test_rejects_huge_viewport() {
        let config = SimulationConfig {
            viewport_height: 3_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ViewportTooLarge {
                field: "viewport_height",
                ..
            })
        ));
        assert!(crate::sim::new_episode(config, 1).is_err());

        let config = SimulationConfig {
            viewport_width: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ViewportTooLarge {
                field: "viewport_width",
                ..
            })
        ));

        // The largest accepted size still converts without wrapping
        let config = SimulationConfig {
            viewport_width: MAX_VIEWPORT,
            viewport_height: MAX_VIEWPORT,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.viewport_size(), (i32::MAX, i32::MAX));
        assert!(config.max_ground_height() > MIN_GROUND_HEIGHT);
    }

    #[test]
    fn test_rejects_huge_vehicle() {
        let config = SimulationConfig {
            vehicle_height: 1e30,
            ..Default::default()
        };
        assert_eq!(config.min_viewport_height(), u32::MAX);
        assert!(matches!(config.validate(), Err(ConfigError::ViewportTooShort { .. })));

        let config = SimulationConfig {
            vehicle_height: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "vehicle_height",
                ..
            })
        ));

        let config = SimulationConfig {
            initial_fuel: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite {
                field: "initial_fuel",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimulationConfig::from_json(r#"{ "gravity": 1.6, "reverse_attitude": true }"#)
            .expect("valid config");
        assert!((config.gravity - 1.6).abs() < f32::EPSILON);
        assert!(config.reverse_attitude);
        assert_eq!(config.viewport_width, 800);
        assert!((config.initial_fuel - 1000.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_json_is_validated() {
        let result = SimulationConfig::from_json(r#"{ "attitude_force": 0 }"#);
        assert!(matches!(result, Err(ConfigError::NonPositive { .. })));

        let result = SimulationConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
