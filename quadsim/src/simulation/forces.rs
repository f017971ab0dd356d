//! External force contributors applied after collision resolution
//!
//! Each term implements [`ExternalForce`] and changes body velocities
//! directly. Terms are collected in a [`ForceSet`] and run once per tick in
//! registration order.

use crate::simulation::states::{Body, NVec2};

/// Collection of external force terms (attractors, etc.)
#[derive(Default)]
pub struct ForceSet {
    terms: Vec<Box<dyn ExternalForce + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ExternalForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Run every term over `bodies` for a step of `dt` seconds.
    /// `target` is the tick's stimulus point (e.g. the cursor), if any.
    pub fn apply(&self, dt: f64, target: Option<NVec2>, bodies: &mut [Body]) {
        for term in &self.terms {
            term.apply(dt, target, bodies);
        }
    }
}

/// Trait for velocity changes applied from outside the contact model
pub trait ExternalForce {
    fn apply(&self, dt: f64, target: Option<NVec2>, bodies: &mut [Body]);
}

/// Pulls bodies toward the target point.
///
/// A body at distance `d < radius` from the target gets a velocity change of
/// `strength * (radius - d) * dt` directed at the target. Mass plays no part.
/// Bodies exactly on the target have no direction and are left alone.
#[derive(Debug, Clone, Copy)]
pub struct PointAttractor {
    pub radius: f64,
    pub strength: f64,
}

impl ExternalForce for PointAttractor {
    fn apply(&self, dt: f64, target: Option<NVec2>, bodies: &mut [Body]) {
        let Some(target) = target else {
            return;
        };
        if dt <= 0.0 || self.radius <= 0.0 {
            return;
        }

        for b in bodies.iter_mut() {
            let to_target = target - b.x;
            let dist = to_target.norm();
            if dist == 0.0 || dist >= self.radius {
                continue;
            }
            let pull = self.strength * (self.radius - dist) * dt;
            b.v += to_target * (pull / dist);
        }
    }
}
