//! Simulation configuration.
//!
//! Every tunable constant of the scene lives here. The defaults reproduce the
//! stock behaviour: 5-14 bees sized 40..150, 5-9 initial stars of 150x100,
//! a star population kept between a soft floor of 5 and a ceiling of 20, and a
//! placement search bounded at 1000 attempts.

use crate::components::Size;
use crate::error::{Result, SimError};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for the bee/star scene.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Size shared by every star. Also the margin subtracted from the play
    /// area when drawing candidate origins, for bees as well as stars.
    pub star_size: Size,
    /// Inclusive range of bees created on first population.
    pub bee_count_min: u32,
    pub bee_count_max: u32,
    /// Bee side length range, min inclusive, max exclusive.
    pub bee_side_min: u32,
    pub bee_side_max: u32,
    /// Inclusive range of stars created on first population.
    pub initial_star_min: u32,
    pub initial_star_max: u32,
    /// At or below this count a tick always creates a star.
    pub star_floor: usize,
    /// At this count a tick always removes a star.
    pub star_ceiling: usize,
    /// Candidates tried before accepting an overlapping placement.
    pub max_placement_attempts: u32,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Suggested interval between ticks for the external driver (seconds).
    /// The engine never reads a clock itself.
    pub tick_interval_secs: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            star_size: Size::new(150.0, 100.0),
            bee_count_min: 5,
            bee_count_max: 14,
            bee_side_min: 40,
            bee_side_max: 150,
            initial_star_min: 5,
            initial_star_max: 9,
            star_floor: 5,
            star_ceiling: 20,
            max_placement_attempts: 1000,
            seed: None,
            tick_interval_secs: 2.0,
        }
    }
}

impl SimConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every range is non-empty and the star bounds are coherent.
    pub fn validate(&self) -> Result<()> {
        if !(self.star_size.width > 0.0 && self.star_size.height > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "star size must be positive, got {}x{}",
                self.star_size.width, self.star_size.height
            )));
        }
        if self.bee_count_min > self.bee_count_max {
            return Err(SimError::InvalidConfig(format!(
                "bee count range {}..={} is empty",
                self.bee_count_min, self.bee_count_max
            )));
        }
        if self.bee_side_min == 0 || self.bee_side_min >= self.bee_side_max {
            return Err(SimError::InvalidConfig(format!(
                "bee side range {}..{} is empty or zero-sized",
                self.bee_side_min, self.bee_side_max
            )));
        }
        if self.initial_star_min > self.initial_star_max {
            return Err(SimError::InvalidConfig(format!(
                "initial star range {}..={} is empty",
                self.initial_star_min, self.initial_star_max
            )));
        }
        if self.star_floor >= self.star_ceiling {
            return Err(SimError::InvalidConfig(format!(
                "star floor {} must be below ceiling {}",
                self.star_floor, self.star_ceiling
            )));
        }
        if self.initial_star_max as usize > self.star_ceiling {
            return Err(SimError::InvalidConfig(format!(
                "initial star max {} exceeds ceiling {}",
                self.initial_star_max, self.star_ceiling
            )));
        }
        if self.max_placement_attempts == 0 {
            return Err(SimError::InvalidConfig(
                "max_placement_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SimConfig::from_json_str(r#"{ "seed": 7, "star_ceiling": 12 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.star_ceiling, 12);
        assert_eq!(config.bee_count_max, 14);
        assert_eq!(config.star_size, Size::new(150.0, 100.0));
    }

    #[test]
    fn test_rejects_inverted_star_bounds() {
        let config = SimConfig {
            star_floor: 20,
            star_ceiling: 20,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_bee_side_range() {
        let config = SimConfig {
            bee_side_min: 150,
            bee_side_max: 150,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_json_is_json_error() {
        let err = SimConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }
}
