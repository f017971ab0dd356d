//! Discrete commands from the presentation layer (key presses, clicks).

use super::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Append `n` randomly placed bodies.
    AddBodies(usize),
    /// Remove up to `n` bodies from the end of the sequence.
    RemoveBodies(usize),
    /// Append `count` small bodies radiating outward from `at`.
    Burst { at: NVec2, count: usize },
    /// Switch between brute force and quadtree broad phase.
    ToggleBroadPhase,
    /// Change the global speed factor by the given amount (clamped).
    AdjustSpeed(f64),
    /// Remove every body.
    Clear,
}
