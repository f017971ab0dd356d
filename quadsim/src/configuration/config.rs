//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – broad-phase strategy, quadtree shape, speed factor
//! - [`ParametersConfig`] – restitution, attractor, seed
//! - [`WorldConfig`]      – initial world size (frame size may change later)
//! - [`SpawnConfig`]      – how many random bodies to generate, and their ranges
//! - [`BodyConfig`]       – explicit initial state for individual bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Only `engine.broad_phase` is required; everything else has a default.
//!
//! ```yaml
//! engine:
//!   broad_phase: "indexed"  # or "brute_force"
//!   node_capacity: 4
//!   max_depth: 8
//!   speed_factor: 1.0
//!   speed_min: 0.0
//!   speed_max: 10.0
//!
//! parameters:
//!   restitution: 1.0
//!   attraction_radius: 150.0
//!   attraction_strength: 5.0
//!   seed: 42
//!
//! world:
//!   width: 800.0
//!   height: 600.0
//!
//! spawn:
//!   count: 200
//!   radius_min: 4.0
//!   radius_max: 12.0
//!   speed_max: 200.0
//!
//! bodies:
//!   - x: [ 100.0, 100.0 ]
//!     v: [  50.0,   0.0 ]
//!     radius: 10.0
//!   - x: [ 115.0, 100.0 ]
//!     v: [ -50.0,   0.0 ]
//!     radius: 10.0
//!     tint: [ 255, 165, 0 ]
//! ```
//!
//! `Scenario::build_scenario` maps this into the runtime types.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::configuration::error::ConfigError;
use crate::simulation::broad_phase::BroadPhase;

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub broad_phase: BroadPhase, // brute force or quadtree
    pub node_capacity: Option<usize>, // items per node before it splits, default 4
    pub max_depth: Option<usize>, // deepest quadtree level, default 8
    pub speed_factor: Option<f64>, // initial global speed factor, default 1
    pub speed_min: Option<f64>, // speed factor range, default [0, 10]
    pub speed_max: Option<f64>,
}

/// Global physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub restitution: f64,
    pub attraction_radius: f64,
    pub attraction_strength: f64,
    pub seed: u64, // makes random spawns reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            restitution: 1.0,
            attraction_radius: 150.0,
            attraction_strength: 5.0,
            seed: 42,
        }
    }
}

/// Initial world size in simulation units
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Randomly generated bodies, added after the explicit ones
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnConfig {
    pub count: usize,
    pub radius_min: f64,
    pub radius_max: f64,
    pub speed_max: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: 0,
            radius_min: 4.0,
            radius_max: 12.0,
            speed_max: 200.0,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial center
    pub v: [f64; 2], // initial velocity
    pub radius: f64, // mass is derived from this
    pub tint: Option<[u8; 3]>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Check the values the runtime relies on: positive radii, a usable
    /// quadtree capacity, ordered ranges, restitution in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.node_capacity == Some(0) {
            return Err(ConfigError::ZeroCapacity);
        }

        let min = self.engine.speed_min.unwrap_or(0.0);
        let max = self.engine.speed_max.unwrap_or(10.0);
        if !(min <= max) {
            return Err(ConfigError::SpeedBounds { min, max });
        }

        let e = self.parameters.restitution;
        if !(0.0..=1.0).contains(&e) {
            return Err(ConfigError::Restitution(e));
        }

        non_negative("parameters.attraction_radius", self.parameters.attraction_radius)?;
        non_negative("parameters.attraction_strength", self.parameters.attraction_strength)?;
        non_negative("world.width", self.world.width)?;
        non_negative("world.height", self.world.height)?;
        non_negative("spawn.speed_max", self.spawn.speed_max)?;

        let (rmin, rmax) = (self.spawn.radius_min, self.spawn.radius_max);
        if !(rmin > 0.0 && rmin <= rmax && rmax.is_finite()) {
            return Err(ConfigError::SpawnRadius { min: rmin, max: rmax });
        }

        for (index, b) in self.bodies.iter().enumerate() {
            if !(b.radius.is_finite() && b.radius > 0.0) {
                return Err(ConfigError::BodyRadius { index, radius: b.radius });
            }
        }

        Ok(())
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
