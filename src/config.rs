//! Tuning parameters of the buoyancy kernel.
//!
//! A [`BuoyancyConfig`] is built once per simulation step by the host, from
//! whatever configuration system it owns, and passed explicitly to every entry
//! point. Nothing in this crate reads global state.

use crate::math::Real;

/// The largest accepted value of [`BuoyancyConfig::max_subdivisions`].
///
/// Subdividing `n` times produces `8^n` boxes per leaf shape.
pub const MAX_SUBDIVISIONS: u32 = 6;

/// Which submerged-volume algorithm a buoyancy pass runs.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SubmersionAlgorithm {
    /// Octree subdivision of each shape's box, clipped against one water plane
    /// per contact. Produces velocity changes.
    Coarse,
    /// Exact box/plane clipping against a water plane sampled per shape, with
    /// per-triangle drag. Produces forces and torques.
    #[default]
    Precise,
}

/// Errors detected by [`BuoyancyConfig::validate`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_subdivisions` is above [`MAX_SUBDIVISIONS`].
    #[error("max_subdivisions is {0} but must be at most {max}.", max = MAX_SUBDIVISIONS)]
    TooManySubdivisions(u32),
    /// A parameter that must be a non-negative finite number isn't.
    #[error("{name} must be non-negative and finite, got {value}.")]
    InvalidValue {
        /// The name of the parameter.
        name: &'static str,
        /// Its value.
        value: Real,
    },
}

/// Tuning parameters of the buoyancy kernel.
///
/// The defaults match a centimeter-gram-second world: water density is
/// `1.0e-3` (in the host's mass-per-cubic-unit) and subdivision stops at boxes
/// of 125 cubic units.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(default))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BuoyancyConfig {
    /// Lets the coarse volume rescaling grow the submerged volume when a body's
    /// mass-derived volume exceeds the volume of its bounding boxes.
    pub allow_volume_ratio_over_one: bool,
    /// Maximum number of octree levels used by the coarse algorithm.
    pub max_subdivisions: u32,
    /// Boxes at or below this volume are never subdivided.
    pub min_subdivision_volume: Real,
    /// The density of water.
    pub water_density: Real,
    /// Linear drag coefficient, per unit of time.
    pub water_drag: Real,
    /// Multiplier applied to `water_drag` for the per-triangle drag of the precise algorithm.
    pub triangle_drag_scale: Real,
    /// The algorithm run by [`BuoyancyPass`](crate::pipeline::BuoyancyPass).
    pub algorithm: SubmersionAlgorithm,
    /// Emits intermediate geometry to the debug renderer, if one is given.
    pub debug_draw: bool,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            allow_volume_ratio_over_one: false,
            max_subdivisions: 2,
            min_subdivision_volume: 125.0,
            water_density: 1.0e-3,
            water_drag: 1.0,
            triangle_drag_scale: 0.1,
            algorithm: SubmersionAlgorithm::Precise,
            debug_draw: false,
        }
    }
}

impl BuoyancyConfig {
    /// The drag coefficient applied to each triangle of the precise algorithm.
    pub fn triangle_drag(&self) -> Real {
        self.water_drag * self.triangle_drag_scale
    }

    /// Checks that every parameter is within its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_subdivisions > MAX_SUBDIVISIONS {
            return Err(ConfigError::TooManySubdivisions(self.max_subdivisions));
        }

        let values = [
            ("min_subdivision_volume", self.min_subdivision_volume),
            ("water_density", self.water_density),
            ("water_drag", self.water_drag),
            ("triangle_drag_scale", self.triangle_drag_scale),
        ];

        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{BuoyancyConfig, ConfigError, SubmersionAlgorithm};

    #[test]
    fn defaults_are_valid() {
        let config = BuoyancyConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.algorithm, SubmersionAlgorithm::Precise);
        approx::assert_relative_eq!(config.triangle_drag(), 0.1);
    }

    #[test]
    fn invalid_values_are_reported() {
        let config = BuoyancyConfig {
            max_subdivisions: 9,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooManySubdivisions(9)));

        let config = BuoyancyConfig {
            water_drag: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                name: "water_drag",
                value: -1.0
            })
        );
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("water_drag"));
    }
}
