//! One simulation tick
//!
//! Order within a tick:
//! 1. drift positions by `v * dt * speed_factor`
//! 2. reflect off the world rectangle
//! 3. broad phase + narrow phase (each overlapping pair resolved once)
//! 4. external forces
//! 5. clamp positions back inside the world
//!
//! The world rectangle is passed in every tick; window size may change
//! between ticks and nothing here caches it.

use tracing::trace;

use super::bounds::BoundsRect;
use super::broad_phase::{resolve_contacts, BroadPhase, PairStats};
use super::engine::Engine;
use super::forces::ForceSet;
use super::integrator::{contain, drift, effective_dt, reflect};
use super::params::Parameters;
use super::states::{NVec2, System};

/// Per-tick diagnostics handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub dt: f64, // step length actually integrated
    pub strategy: BroadPhase,
    pub bodies: usize,
    pub pairs: PairStats,
}

impl TickReport {
    pub fn pair_checks(&self) -> usize {
        self.pairs.pair_checks
    }
}

/// Inputs that vary from tick to tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    pub dt: f64, // seconds since last tick
    pub width: f64, // current frame size
    pub height: f64,
    pub target: Option<NVec2>, // attractor point, if any
}

impl TickInput {
    pub fn new(dt: f64, width: f64, height: f64) -> Self {
        Self {
            dt,
            width,
            height,
            target: None,
        }
    }

    pub fn with_target(mut self, target: NVec2) -> Self {
        self.target = Some(target);
        self
    }

    pub fn world(&self) -> BoundsRect {
        BoundsRect::from_size(self.width, self.height)
    }
}

/// Advance `sys` by one tick.
pub fn step(
    sys: &mut System,
    input: &TickInput,
    engine: &Engine,
    params: &Parameters,
    forces: &ForceSet,
) -> TickReport {
    let dt = effective_dt(input.dt);
    let world = input.world();

    drift(&mut sys.bodies, dt, engine.speed_factor());
    reflect(&mut sys.bodies, &world);

    let pairs = resolve_contacts(
        &mut sys.bodies,
        &world,
        engine.broad_phase,
        engine.node_capacity,
        engine.max_depth,
        params.restitution,
    );

    forces.apply(dt, input.target, &mut sys.bodies);
    contain(&mut sys.bodies, &world);

    sys.t += dt;

    let report = TickReport {
        dt,
        strategy: engine.broad_phase,
        bodies: sys.bodies.len(),
        pairs,
    };
    trace!(
        t = sys.t,
        bodies = report.bodies,
        checks = pairs.pair_checks,
        resolved = pairs.resolved,
        strategy = ?report.strategy,
        "tick"
    );
    report
}
