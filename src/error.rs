//! Error types for the reaction engine.
//!
//! Degenerate chemistry (an empty species, a conversion that runs out of
//! particles) is ordinary data and never surfaces here. These errors cover
//! configuration and misuse of the public entry points.

use crate::species::Species;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving or validating a [`SimConfig`](crate::SimConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value the engine cannot run with.
    #[error("Invalid config value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when driving a simulation.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// The configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The species cannot be added or removed one at a time.
    #[error("Species {species} cannot be {action} individually")]
    UnsupportedSpecies {
        species: Species,
        action: &'static str,
    },

    /// Requested speed level is outside `1..=max`.
    #[error("Speed level {level} is out of range (1..={max})")]
    SpeedLevel { level: u32, max: u32 },
}
