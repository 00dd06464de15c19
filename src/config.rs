//! Init-time configuration
//!
//! Defaults can be replaced by a JSON file and individual command-line flags.
//! Nothing here changes once the simulation is running.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cell::GridBounds;
use crate::error::{Error, Result};

/// Simulation and presentation constants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of grid columns
    pub grid_width: u32,
    /// Number of grid rows
    pub grid_height: u32,
    /// Terminal columns covered by one cell
    pub tile_width: u16,
    /// Terminal rows covered by one cell
    pub tile_height: u16,
    /// Frame clock rate (ticks per second)
    pub fps: u32,
    /// Ticks between generations at startup
    pub initial_update_freq: u32,
    /// Slowest allowed speed, in ticks between generations
    pub max_update_freq: u32,
    /// Change in update frequency per speed keypress
    pub speed_step: u32,
    /// Smallest randomize multiplier (inclusive)
    pub randomize_multiplier_min: u32,
    /// Largest randomize multiplier (exclusive)
    pub randomize_multiplier_max: u32,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: 80,
            grid_height: 40,
            tile_width: 2,
            tile_height: 1,
            fps: 60,
            initial_update_freq: 60,
            max_update_freq: 120,
            speed_step: 20,
            randomize_multiplier_min: 4,
            randomize_multiplier_max: 10,
            seed: None,
        }
    }
}

impl Config {
    /// Loads a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Checks that every value is usable by the engine and the frame clock.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::InvalidConfig(msg));

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.grid_width > i32::MAX as u32 || self.grid_height > i32::MAX as u32 {
            return invalid("grid dimensions exceed i32 range".to_string());
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return invalid("tile size must be positive".to_string());
        }
        if self.fps == 0 {
            return invalid("fps must be positive".to_string());
        }
        if self.max_update_freq == 0 {
            return invalid("max_update_freq must be at least 1".to_string());
        }
        if !(1..=self.max_update_freq).contains(&self.initial_update_freq) {
            return invalid(format!(
                "initial_update_freq {} outside 1..={}",
                self.initial_update_freq, self.max_update_freq
            ));
        }
        if self.speed_step == 0 {
            return invalid("speed_step must be positive".to_string());
        }
        if self.randomize_multiplier_min >= self.randomize_multiplier_max {
            return invalid(format!(
                "empty randomize multiplier range {}..{}",
                self.randomize_multiplier_min, self.randomize_multiplier_max
            ));
        }
        Ok(())
    }

    /// Grid extent for neighbor filtering and random sampling.
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.grid_width, self.grid_height)
    }

    /// Length of one frame clock tick.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bounds(), GridBounds::new(80, 40));
        assert_eq!(config.frame_duration(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = Config::from_json_str(r#"{ "grid_width": 30, "seed": 42 }"#).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.grid_height, Config::default().grid_height);
        assert_eq!(config.speed_step, 20);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = Config::from_json_str("{ grid_width: ").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_json_file(Path::new("/nonexistent/life.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            Config { grid_width: 0, ..Config::default() },
            Config { tile_height: 0, ..Config::default() },
            Config { fps: 0, ..Config::default() },
            Config { initial_update_freq: 0, ..Config::default() },
            Config { initial_update_freq: 121, ..Config::default() },
            Config { speed_step: 0, ..Config::default() },
            Config {
                randomize_multiplier_min: 5,
                randomize_multiplier_max: 5,
                ..Config::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }
}
