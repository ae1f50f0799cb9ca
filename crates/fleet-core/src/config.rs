//! Configuration
//!
//! Loads simulation parameters from a TOML file. Every section is optional;
//! missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::path::DEFAULT_RESOLUTION;
use crate::registry::EndBehavior;
use crate::sampler::DEFAULT_MAX_ATTEMPTS;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "fleet.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub fleet: FleetConfig,
    #[serde(default)]
    pub area: AreaConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Clock and geometry parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Milliseconds between clock ticks
    pub tick_period_ms: u64,
    /// Interpolation steps per waypoint segment
    pub sample_resolution: u32,
    /// Rejection-sampling cap per point
    pub max_sample_attempts: u32,
    /// RNG seed; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Behaviour at the end of a path
    pub end_behavior: EndBehavior,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 2000,
            sample_resolution: DEFAULT_RESOLUTION,
            max_sample_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            end_behavior: EndBehavior::Clamp,
        }
    }
}

impl SimulationConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}

/// Population parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    pub vehicle_count: usize,
    pub partner_count: u32,
    pub waypoints_per_vehicle: usize,
    pub status_weights: StatusWeights,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            vehicle_count: 1000,
            partner_count: 11,
            waypoints_per_vehicle: 4,
            status_weights: StatusWeights::default(),
        }
    }
}

/// Relative frequency of each status in a new population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusWeights {
    pub active: f64,
    pub inactive: f64,
    pub maintenance: f64,
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            active: 0.7,
            inactive: 0.1,
            maintenance: 0.2,
        }
    }
}

/// Operating area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// GeoJSON polygon file; the built-in mining area is used when absent
    pub boundary_path: Option<PathBuf>,
}

/// Snapshot output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// Ticks between archived snapshots
    pub snapshot_interval: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            snapshot_interval: 10,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, or uses defaults if it cannot be read.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::from_file(path).unwrap_or_else(|e| {
            warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.tick_period_ms == 0 {
            return Err(ConfigError::Invalid("tick_period_ms must be positive".into()));
        }
        if self.simulation.max_sample_attempts == 0 {
            return Err(ConfigError::Invalid("max_sample_attempts must be positive".into()));
        }
        if self.fleet.partner_count == 0 {
            return Err(ConfigError::Invalid("partner_count must be positive".into()));
        }
        if self.fleet.waypoints_per_vehicle == 0 {
            return Err(ConfigError::Invalid("waypoints_per_vehicle must be positive".into()));
        }
        let w = self.fleet.status_weights;
        let weights = [w.active, w.inactive, w.maintenance];
        if weights.iter().any(|x| !x.is_finite() || *x < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::Invalid(
                "status_weights must be non-negative with a positive sum".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
