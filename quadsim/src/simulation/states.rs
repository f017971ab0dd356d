//! Core state types for the bouncing-body simulation.
//!
//! - `Body`   one circular body using `NVec2`
//! - `System` the ordered body sequence plus the simulation time `t`
//!
//! Bodies are referred to by their index into `System::bodies`. Indices are
//! stable for the length of a tick; the sequence only grows at the end and
//! shrinks from the end so earlier indices survive add/remove commands.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Mass assigned per unit of radius.
pub const MASS_PER_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position (center)
    pub v: NVec2, // velocity, units per second
    pub m: f64, // mass, always radius * MASS_PER_RADIUS
    pub radius: f64, // collision and render extent
    pub tint: [u8; 3], // render color, ignored by the physics
}

impl Body {
    /// Create a body, deriving its mass from the radius.
    ///
    /// # Panics
    /// Panics if `radius` is not strictly positive and finite. Callers building
    /// bodies from user input validate first (see `ScenarioConfig::validate`).
    pub fn new(x: NVec2, v: NVec2, radius: f64) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "body radius must be positive, got {radius}"
        );
        Self {
            x,
            v,
            m: radius * MASS_PER_RADIUS,
            radius,
            tint: [255, 255, 255],
        }
    }

    pub fn with_tint(mut self, tint: [u8; 3]) -> Self {
        self.tint = tint;
        self
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // ordered body sequence
    pub t: f64, // time
}

impl System {
    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.momentum())
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Largest radius in the system, 0 when empty.
    pub fn max_radius(&self) -> f64 {
        max_radius(&self.bodies)
    }
}

pub(crate) fn max_radius(bodies: &[Body]) -> f64 {
    bodies.iter().map(|b| b.radius).fold(0.0, f64::max)
}
