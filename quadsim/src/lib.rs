pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2, MASS_PER_RADIUS};
pub use simulation::bounds::BoundsRect;
pub use simulation::quadtree::{Quadtree, QuadNode};
pub use simulation::collision::{resolve, resolve_velocity, resolve_pair, Contact};
pub use simulation::broad_phase::{BroadPhase, PairStats, candidate_pairs, resolve_contacts};
pub use simulation::forces::{ExternalForce, ForceSet, PointAttractor};
pub use simulation::engine::Engine;
pub use simulation::params::Parameters;
pub use simulation::step::{step, TickInput, TickReport};
pub use simulation::commands::Command;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, WorldConfig, SpawnConfig, BodyConfig, ScenarioConfig};
pub use configuration::error::ConfigError;

pub use benchmark::benchmark::bench_broad_phase;
