//! Errors raised while loading or validating a scenario.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for scenario configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Scenario file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// YAML did not match the scenario schema.
    #[error("invalid scenario yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// An explicit body has a zero, negative or non-finite radius.
    #[error("body {index}: radius must be positive, got {radius}")]
    BodyRadius { index: usize, radius: f64 },
    /// Quadtree nodes must hold at least one item.
    #[error("engine.node_capacity must be at least 1")]
    ZeroCapacity,
    /// `speed_min` is above `speed_max`.
    #[error("speed bounds inverted: min {min} > max {max}")]
    SpeedBounds { min: f64, max: f64 },
    /// Restitution outside `[0, 1]`.
    #[error("restitution {0} is outside [0, 1]")]
    Restitution(f64),
    /// Spawn radius range is empty or not positive.
    #[error("spawn radius range [{min}, {max}] is invalid")]
    SpawnRadius { min: f64, max: f64 },
    /// A value that must be non-negative and finite is not.
    #[error("{name} must be a non-negative number, got {value}")]
    Negative { name: &'static str, value: f64 },
}
