//! Simulation configuration.
//!
//! These values can be serialized to JSON and loaded by the runner. Every
//! field has a default matching the classroom setup, so a config file only
//! needs the fields it changes.

use crate::error::ConfigError;
use crate::mode::Mode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_vessel_width() -> f64 {
    600.0
}

fn default_vessel_height() -> f64 {
    400.0
}

fn default_particle_radius() -> f64 {
    8.0
}

fn default_base_reaction_rate() -> f64 {
    crate::reaction::BASE_REACTION_RATE
}

fn default_proximity_factor() -> f64 {
    crate::reaction::PROXIMITY_FACTOR
}

fn default_initial_population() -> usize {
    crate::accounting::INITIAL_POPULATION
}

fn default_inert_batch() -> usize {
    5
}

fn default_speed_level() -> u32 {
    3
}

fn default_max_speed_level() -> u32 {
    5
}

fn default_tick_interval_ms() -> u64 {
    30
}

/// Complete simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    /// Vessel width in pixels.
    #[serde(default = "default_vessel_width")]
    pub vessel_width: f64,
    /// Vessel height in pixels.
    #[serde(default = "default_vessel_height")]
    pub vessel_height: f64,
    #[serde(default = "default_particle_radius")]
    pub particle_radius: f64,
    /// Reaction probability per tick at speed level 1.
    #[serde(default = "default_base_reaction_rate")]
    pub base_reaction_rate: f64,
    /// Reaction range as a multiple of the particle radius.
    #[serde(default = "default_proximity_factor")]
    pub proximity_factor: f64,
    /// Particles of each species created on reset (doubled for B under pressure).
    #[serde(default = "default_initial_population")]
    pub initial_population: usize,
    /// Inert particles added per `add_inert_gas` call.
    #[serde(default = "default_inert_batch")]
    pub inert_batch: usize,
    /// Initial speed level, `1..=max_speed_level`.
    #[serde(default = "default_speed_level")]
    pub speed_level: u32,
    #[serde(default = "default_max_speed_level")]
    pub max_speed_level: u32,
    /// Delay between ticks for the built-in tick loop.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub mode: Mode,
    /// Fixed RNG seed. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            vessel_width: default_vessel_width(),
            vessel_height: default_vessel_height(),
            particle_radius: default_particle_radius(),
            base_reaction_rate: default_base_reaction_rate(),
            proximity_factor: default_proximity_factor(),
            initial_population: default_initial_population(),
            inert_batch: default_inert_batch(),
            speed_level: default_speed_level(),
            max_speed_level: default_max_speed_level(),
            tick_interval_ms: default_tick_interval_ms(),
            mode: Mode::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
            }
        };

        positive("vessel_width", self.vessel_width)?;
        positive("vessel_height", self.vessel_height)?;
        positive("particle_radius", self.particle_radius)?;
        positive("proximity_factor", self.proximity_factor)?;

        if !(self.base_reaction_rate.is_finite() && self.base_reaction_rate >= 0.0) {
            return Err(ConfigError::invalid(
                "base_reaction_rate",
                format!("must be a non-negative probability, got {}", self.base_reaction_rate),
            ));
        }
        if self.max_speed_level == 0 {
            return Err(ConfigError::invalid("max_speed_level", "must be at least 1"));
        }
        if !(1..=self.max_speed_level).contains(&self.speed_level) {
            return Err(ConfigError::invalid(
                "speed_level",
                format!("must be within 1..={}, got {}", self.max_speed_level, self.speed_level),
            ));
        }
        Ok(())
    }
}
