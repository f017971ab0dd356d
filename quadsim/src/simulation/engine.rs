//! High-level runtime engine settings
//!
//! Selects the broad-phase strategy and quadtree shape, and owns the global
//! speed factor. The speed factor is only changed through
//! [`Engine::set_speed`]/[`Engine::adjust_speed`], which clamp it to the
//! configured range.

use crate::simulation::broad_phase::BroadPhase;

#[derive(Debug, Clone)]
pub struct Engine {
    pub broad_phase: BroadPhase, // brute force or quadtree
    pub node_capacity: usize, // items per quadtree node before it splits
    pub max_depth: usize, // deepest quadtree level
    speed_factor: f64, // scales every integration step
    speed_min: f64,
    speed_max: f64,
}

impl Engine {
    /// `speed_min`/`speed_max` are swapped if given in the wrong order and the
    /// initial factor is clamped into range.
    pub fn new(
        broad_phase: BroadPhase,
        node_capacity: usize,
        max_depth: usize,
        speed_factor: f64,
        speed_min: f64,
        speed_max: f64,
    ) -> Self {
        let (lo, hi) = if speed_min <= speed_max {
            (speed_min, speed_max)
        } else {
            (speed_max, speed_min)
        };
        let mut engine = Self {
            broad_phase,
            node_capacity: node_capacity.max(1),
            max_depth,
            speed_factor: 1.0,
            speed_min: lo,
            speed_max: hi,
        };
        engine.set_speed(speed_factor);
        engine
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    pub fn speed_bounds(&self) -> (f64, f64) {
        (self.speed_min, self.speed_max)
    }

    /// Set the speed factor, clamped to the configured range. Returns the value
    /// actually stored.
    pub fn set_speed(&mut self, factor: f64) -> f64 {
        if factor.is_finite() {
            self.speed_factor = factor.clamp(self.speed_min, self.speed_max);
        }
        self.speed_factor
    }

    /// Nudge the speed factor by `delta`, clamped to the configured range.
    pub fn adjust_speed(&mut self, delta: f64) -> f64 {
        self.set_speed(self.speed_factor + delta)
    }

    /// Flip between brute force and the quadtree, returning the new strategy.
    pub fn toggle_broad_phase(&mut self) -> BroadPhase {
        self.broad_phase = self.broad_phase.toggled();
        self.broad_phase
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(BroadPhase::Indexed, 4, 8, 1.0, 0.0, 10.0)
    }
}
