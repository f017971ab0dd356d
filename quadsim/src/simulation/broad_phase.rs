//! Broad-phase strategies and the per-tick contact pass
//!
//! Both strategies visit overlapping pairs in the same order, lowest index
//! first and then ascending partner index, and resolve each pair at most once
//! per tick. The indexed strategy only skips pairs that cannot touch, so the
//! two produce the same contacts.

use serde::Deserialize;

use crate::simulation::bounds::BoundsRect;
use crate::simulation::collision::{resolve_pair, Contact};
use crate::simulation::quadtree::Quadtree;
use crate::simulation::states::{max_radius, Body};

/// Which broad phase finds candidate pairs.
/// `broad_phase: "brute_force"` or `broad_phase: "indexed"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadPhase {
    #[serde(rename = "brute_force")] // every unordered pair, O(N²)
    BruteForce,

    #[serde(rename = "indexed")] // quadtree rebuilt each tick, O(N log N) typical
    Indexed,
}

impl BroadPhase {
    pub fn toggled(self) -> Self {
        match self {
            BroadPhase::BruteForce => BroadPhase::Indexed,
            BroadPhase::Indexed => BroadPhase::BruteForce,
        }
    }
}

/// Counters from one contact pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairStats {
    pub pair_checks: usize, // narrow-phase tests performed
    pub resolved: usize, // pairs that received an impulse
    pub coincident: usize, // pairs skipped for lack of a normal
    pub indexed: usize, // bodies stored in the quadtree (0 for brute force)
    pub dropped: usize, // bodies left out of the quadtree
    pub tree_depth: usize,
    pub tree_nodes: usize,
}

impl PairStats {
    fn record(&mut self, contact: Contact) {
        self.pair_checks += 1;
        match contact {
            Contact::Resolved { .. } => self.resolved += 1,
            Contact::Coincident => self.coincident += 1,
            Contact::Separate | Contact::Separating => {}
        }
    }
}

/// Resolve every overlapping pair once using the engine's strategy.
pub fn resolve_contacts(
    bodies: &mut [Body],
    world: &BoundsRect,
    strategy: BroadPhase,
    node_capacity: usize,
    max_depth: usize,
    restitution: f64,
) -> PairStats {
    match strategy {
        BroadPhase::BruteForce => resolve_brute_force(bodies, restitution),
        BroadPhase::Indexed => {
            resolve_indexed(bodies, world, node_capacity, max_depth, restitution)
        }
    }
}

/// Test every unordered pair `(i, j)` with `i < j`.
pub fn resolve_brute_force(bodies: &mut [Body], restitution: f64) -> PairStats {
    let mut stats = PairStats::default();
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            stats.record(resolve_pair(bodies, i, j, restitution));
        }
    }
    stats
}

/// Build a quadtree over current positions and test each body only against
/// the higher-indexed candidates the tree returns.
pub fn resolve_indexed(
    bodies: &mut [Body],
    world: &BoundsRect,
    node_capacity: usize,
    max_depth: usize,
    restitution: f64,
) -> PairStats {
    let tree = Quadtree::build(*world, node_capacity, max_depth, bodies);
    let reach = max_radius(bodies);

    let mut stats = PairStats {
        indexed: tree.len(),
        dropped: tree.dropped(),
        tree_depth: tree.depth(),
        tree_nodes: tree.node_count(),
        ..PairStats::default()
    };

    let mut candidates = Vec::new();
    for i in 0..bodies.len() {
        candidates.clear();
        tree.query_into(&contact_region(&bodies[i], reach), &mut candidates);
        candidates.retain(|&j| j > i);
        candidates.sort_unstable();

        for &j in &candidates {
            stats.record(resolve_pair(bodies, i, j, restitution));
        }
    }
    stats
}

/// Every unordered candidate pair `(i, j)`, `i < j`, that the chosen strategy
/// would hand to the narrow phase, sorted ascending. Does not touch the bodies.
pub fn candidate_pairs(
    bodies: &[Body],
    world: &BoundsRect,
    strategy: BroadPhase,
    node_capacity: usize,
    max_depth: usize,
) -> Vec<(usize, usize)> {
    let n = bodies.len();
    let mut out = Vec::new();
    match strategy {
        BroadPhase::BruteForce => {
            for i in 0..n {
                out.extend(((i + 1)..n).map(|j| (i, j)));
            }
        }
        BroadPhase::Indexed => {
            let tree = Quadtree::build(*world, node_capacity, max_depth, bodies);
            let reach = max_radius(bodies);
            for (i, b) in bodies.iter().enumerate() {
                let mut found = tree.query(&contact_region(b, reach));
                found.retain(|&j| j > i);
                found.sort_unstable();
                out.extend(found.into_iter().map(|j| (i, j)));
            }
        }
    }
    out
}

/// Square around `b` wide enough to contain the center of any body that can
/// touch it: half-extent `b.radius + reach`, where `reach` is the largest
/// radius in play.
pub fn contact_region(b: &Body, reach: f64) -> BoundsRect {
    let half = b.radius + reach;
    BoundsRect::centered(b.x, half, half)
}
