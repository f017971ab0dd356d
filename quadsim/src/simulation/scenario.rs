//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active external forces (`ForceSet`)
//!
//! The scenario owns the body sequence across ticks. The presentation layer
//! calls [`Scenario::tick`] once per frame, forwards input as [`Command`]s,
//! and reads [`Scenario::bodies`] for drawing.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::configuration::error::ConfigError;
use crate::simulation::bounds::BoundsRect;
use crate::simulation::commands::Command;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, PointAttractor};
use crate::simulation::params::Parameters;
use crate::simulation::quadtree::Quadtree;
use crate::simulation::states::{Body, NVec2, System};
use crate::simulation::step::{step, TickInput, TickReport};

/// Colors handed out to spawned bodies
pub const PALETTE: [[u8; 3]; 7] = [
    [100, 200, 255],
    [255, 0, 0],
    [255, 255, 0],
    [255, 165, 0],
    [255, 255, 255],
    [0, 255, 255],
    [255, 0, 255],
];

// burst bodies: speed 80 ± 40, radius 3 ± 2
const BURST_SPEED: f64 = 80.0;
const BURST_SPEED_JITTER: f64 = 40.0;
const BURST_RADIUS: f64 = 3.0;
const BURST_RADIUS_JITTER: f64 = 2.0;

/// Runtime bundle for one simulation
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
    world: BoundsRect, // last frame size seen, used for spawning
    rng: ChaCha8Rng,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Engine (runtime) from EngineConfig
        let e_cfg = &cfg.engine;
        let engine = Engine::new(
            e_cfg.broad_phase,
            e_cfg.node_capacity.unwrap_or(4),
            e_cfg.max_depth.unwrap_or(8),
            e_cfg.speed_factor.unwrap_or(1.0),
            e_cfg.speed_min.unwrap_or(0.0),
            e_cfg.speed_max.unwrap_or(10.0),
        );

        // Parameters (runtime) from ParametersConfig + SpawnConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            restitution: p_cfg.restitution,
            attraction_radius: p_cfg.attraction_radius,
            attraction_strength: p_cfg.attraction_strength,
            radius_min: cfg.spawn.radius_min,
            radius_max: cfg.spawn.radius_max,
            speed_max: cfg.spawn.speed_max,
            seed: p_cfg.seed,
        };

        // Forces: the cursor attractor is the only external term
        let forces = ForceSet::new().with(PointAttractor {
            radius: parameters.attraction_radius,
            strength: parameters.attraction_strength,
        });

        // Bodies: map `BodyConfig` -> runtime `Body`
        let bodies: Vec<Body> = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc): (usize, &BodyConfig)| {
                Body::new(NVec2::new(bc.x[0], bc.x[1]), NVec2::new(bc.v[0], bc.v[1]), bc.radius)
                    .with_tint(bc.tint.unwrap_or(PALETTE[i % PALETTE.len()]))
            })
            .collect();

        let mut scenario = Self {
            engine,
            rng: ChaCha8Rng::seed_from_u64(parameters.seed),
            parameters,
            system: System { bodies, t: 0.0 },
            forces,
            world: BoundsRect::from_size(cfg.world.width, cfg.world.height),
        };
        scenario.spawn_random(cfg.spawn.count);
        Ok(scenario)
    }

    /// Body sequence in index order, for rendering.
    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn world(&self) -> BoundsRect {
        self.world
    }

    /// Advance one tick with this frame's size, time step and target.
    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        self.world = input.world();
        step(&mut self.system, input, &self.engine, &self.parameters, &self.forces)
    }

    /// Apply a command from the presentation layer. Bodies are only appended
    /// or removed from the end, so indices of the remaining bodies hold.
    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::AddBodies(n) => {
                self.spawn_random(n);
                info!(added = n, total = self.system.bodies.len(), "bodies added");
            }
            Command::RemoveBodies(n) => {
                let keep = self.system.bodies.len().saturating_sub(n);
                self.system.bodies.truncate(keep);
                info!(total = keep, "bodies removed");
            }
            Command::Burst { at, count } => {
                self.spawn_burst(at, count);
                info!(x = at.x, y = at.y, count, "burst spawned");
            }
            Command::ToggleBroadPhase => {
                let now = self.engine.toggle_broad_phase();
                info!(strategy = ?now, "broad phase switched");
            }
            Command::AdjustSpeed(delta) => {
                let now = self.engine.adjust_speed(delta);
                info!(speed_factor = now, "speed factor changed");
            }
            Command::Clear => {
                self.system.bodies.clear();
                info!("bodies cleared");
            }
        }
    }

    /// Quadtree node bounds over the current positions, for a debug overlay.
    pub fn index_overlay(&self, width: f64, height: f64) -> Vec<BoundsRect> {
        Quadtree::build(
            BoundsRect::from_size(width, height),
            self.engine.node_capacity,
            self.engine.max_depth,
            &self.system.bodies,
        )
        .level_bounds()
    }

    /// Append `n` bodies at uniform random positions inside the world with
    /// random headings and speeds up to `speed_max`.
    fn spawn_random(&mut self, n: usize) {
        let p = &self.parameters;
        let world = self.world;
        self.system.bodies.reserve(n);

        for _ in 0..n {
            let radius = self.rng.gen_range(p.radius_min..=p.radius_max);
            let x = NVec2::new(
                random_axis(&mut self.rng, world.x, world.right(), radius),
                random_axis(&mut self.rng, world.y, world.bottom(), radius),
            );
            let heading = self.rng.gen_range(0.0..TAU);
            let speed = self.rng.gen_range(0.0..=p.speed_max);
            let v = NVec2::new(heading.cos(), heading.sin()) * speed;
            let tint = PALETTE[self.rng.gen_range(0..PALETTE.len())];

            self.system.bodies.push(Body::new(x, v, radius).with_tint(tint));
        }
    }

    /// Append `count` bodies at `at`, headings evenly spread around a circle.
    /// They start coincident (which the resolver skips) and fan out on the
    /// next drift.
    fn spawn_burst(&mut self, at: NVec2, count: usize) {
        self.system.bodies.reserve(count);
        for i in 0..count {
            let angle = TAU * i as f64 / count as f64;
            let speed = BURST_SPEED + self.rng.gen_range(-1.0..=1.0) * BURST_SPEED_JITTER;
            let radius = BURST_RADIUS + self.rng.gen_range(-1.0..=1.0) * BURST_RADIUS_JITTER;
            let v = NVec2::new(angle.cos(), angle.sin()) * speed;
            let tint = PALETTE[1 + self.rng.gen_range(0..3)];

            self.system.bodies.push(Body::new(at, v, radius).with_tint(tint));
        }
    }
}

fn random_axis(rng: &mut ChaCha8Rng, lo: f64, hi: f64, radius: f64) -> f64 {
    if hi - lo <= 2.0 * radius {
        0.5 * (lo + hi)
    } else {
        rng.gen_range((lo + radius)..=(hi - radius))
    }
}
