//! # Broad-phase Quadtree (2D)
//!
//! This module implements a **region quadtree** over body positions, used as
//! the broad-phase filter for collision detection. Instead of testing every
//! unordered pair of bodies (`O(N²)`), each body asks the tree for the bodies
//! stored near it and only those candidates reach the narrow phase.
//!
//! ## Core Concepts
//!
//! - The world rectangle is the root node.
//! - A node stores up to `capacity` body references directly.
//! - Once a node is full it is split into 4 equal quadrants (NE, NW, SE, SW)
//!   and further bodies are pushed down into the first quadrant containing
//!   their position.
//! - A node at `max_depth` never splits; extra bodies pile up in it
//!   ("overflow"). This is what bounds recursion when many bodies share a
//!   position.
//! - Nodes live in a flat arena (`Quadtree::nodes`) and refer to their
//!   children by index, so the tree owns everything and is dropped in one go.
//!
//! The tree is rebuilt from scratch every tick and never updated in place.
//! Body references are plain `usize` indices into the caller's body slice.

use tracing::debug;

use crate::simulation::bounds::BoundsRect;
use crate::simulation::states::{Body, NVec2};

/// A single quadtree node.
///
/// A node is either:
/// - a **leaf** (`children == None`) holding at most `capacity` items, or more
///   if it sits at `max_depth`, or
/// - **internal** (`children == Some(..)`) with exactly 4 children. It keeps the
///   items it accepted before it filled up, plus any item that could not be
///   placed in a child.
#[derive(Debug, Clone)]
pub struct QuadNode {
    pub bounds: BoundsRect,
    pub depth: usize,
    pub items: Vec<usize>,            // body indices stored at this node
    pub children: Option<[usize; 4]>, // NE, NW, SE, SW indices into Quadtree::nodes
}

impl QuadNode {
    fn empty(bounds: BoundsRect, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// A complete quadtree built over one tick's body positions.
///
/// This structure owns:
/// - a vector of all nodes (`nodes`), root at index `0`
/// - the split parameters (`capacity`, `max_depth`)
/// - counters for accepted and dropped inserts
#[derive(Debug, Clone)]
pub struct Quadtree {
    pub nodes: Vec<QuadNode>,
    capacity: usize,
    max_depth: usize,
    len: usize,
    dropped: usize,
}

impl Quadtree {
    pub const ROOT: usize = 0;

    /// Create an empty tree covering `bounds`.
    ///
    /// `capacity` is clamped to at least 1; a zero capacity would force every
    /// insert straight down to `max_depth`.
    pub fn new(bounds: BoundsRect, capacity: usize, max_depth: usize) -> Self {
        Self {
            nodes: vec![QuadNode::empty(bounds, 0)],
            capacity: capacity.max(1),
            max_depth,
            len: 0,
            dropped: 0,
        }
    }

    /// Build a quadtree over the current positions of `bodies`.
    ///
    /// Body `i` is inserted under reference `i`. Bodies whose center lies
    /// outside `bounds` are left out of the tree and counted in
    /// [`Quadtree::dropped`]; they simply never show up as candidates.
    ///
    /// # Parameters
    /// - `bounds`    : world rectangle, becomes the root node
    /// - `capacity`  : items a node holds before it subdivides
    /// - `max_depth` : deepest level allowed to exist; root is level 0
    /// - `bodies`    : body sequence for this tick
    pub fn build(bounds: BoundsRect, capacity: usize, max_depth: usize, bodies: &[Body]) -> Self {
        let mut tree = Quadtree::new(bounds, capacity, max_depth);
        for (i, b) in bodies.iter().enumerate() {
            tree.insert(i, b.x);
        }
        if tree.dropped > 0 {
            debug!(dropped = tree.dropped, "bodies outside world bounds left out of the index");
        }
        tree
    }

    /// Insert body reference `item` located at `pos`.
    ///
    /// Returns `false` (and counts a drop) when `pos` is outside the root
    /// bounds. Any in-bounds point is always accepted somewhere in the tree.
    pub fn insert(&mut self, item: usize, pos: NVec2) -> bool {
        if !self.nodes[Self::ROOT].bounds.contains(&pos) {
            self.dropped += 1;
            return false;
        }
        self.insert_at(Self::ROOT, item, pos);
        self.len += 1;
        true
    }

    /// Return every body reference stored in a node whose bounds intersect
    /// `region`.
    ///
    /// The result is a superset of the bodies whose position lies inside
    /// `region`; callers filter the false positives in the narrow phase.
    /// Order is depth-first with children visited NE, NW, SE, SW, which is
    /// deterministic for a given tree.
    pub fn query(&self, region: &BoundsRect) -> Vec<usize> {
        let mut out = Vec::new();
        self.query_into(region, &mut out);
        out
    }

    /// Same as [`Quadtree::query`] but appends into a caller-owned buffer.
    pub fn query_into(&self, region: &BoundsRect, out: &mut Vec<usize>) {
        self.collect(Self::ROOT, region, out);
    }

    /// Bounds of every node, depth-first. Used for the debug overlay.
    pub fn level_bounds(&self) -> Vec<BoundsRect> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk_bounds(Self::ROOT, &mut out);
        out
    }

    /// Deepest level currently present (root only = 0).
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of references stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of inserts rejected for lying outside the root bounds.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn bounds(&self) -> BoundsRect {
        self.nodes[Self::ROOT].bounds
    }

    // helpers ==============================================================================

    /// Insert `item` starting at `node_idx`. The caller guarantees that `pos`
    /// lies inside the bounds of `node_idx`.
    ///
    /// - Room left at this node: store it here.
    /// - Full and at `max_depth`: store it here anyway (overflow).
    /// - Full otherwise: subdivide if needed, then descend into the first
    ///   quadrant (NE, NW, SE, SW) that contains `pos`. If none does, which
    ///   only happens through rounding at a shared edge, keep it here.
    fn insert_at(&mut self, node_idx: usize, item: usize, pos: NVec2) {
        // Snapshot by value so no &mut borrow is held while recursing
        let depth = self.nodes[node_idx].depth;
        let stored = self.nodes[node_idx].items.len();

        if stored < self.capacity || depth >= self.max_depth {
            self.nodes[node_idx].items.push(item);
            return;
        }

        let children = match self.nodes[node_idx].children {
            Some(children) => children,
            None => self.subdivide(node_idx),
        };

        let target = children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].bounds.contains(&pos));

        match target {
            Some(child_idx) => self.insert_at(child_idx, item, pos),
            None => self.nodes[node_idx].items.push(item),
        }
    }

    /// Split a node into 4 quadrant children and return their indices.
    fn subdivide(&mut self, node_idx: usize) -> [usize; 4] {
        let bounds = self.nodes[node_idx].bounds;
        let depth = self.nodes[node_idx].depth + 1;

        let mut children = [0usize; 4];
        for (slot, quadrant) in children.iter_mut().zip(bounds.quadrants()) {
            *slot = self.nodes.len();
            self.nodes.push(QuadNode::empty(quadrant, depth));
        }
        self.nodes[node_idx].children = Some(children);
        children
    }

    fn collect(&self, node_idx: usize, region: &BoundsRect, out: &mut Vec<usize>) {
        let node = &self.nodes[node_idx];
        if !node.bounds.intersects(region) {
            return;
        }
        out.extend_from_slice(&node.items);
        if let Some(children) = node.children {
            for child in children {
                self.collect(child, region, out);
            }
        }
    }

    fn walk_bounds(&self, node_idx: usize, out: &mut Vec<BoundsRect>) {
        let node = &self.nodes[node_idx];
        out.push(node.bounds);
        if let Some(children) = node.children {
            for child in children {
                self.walk_bounds(child, out);
            }
        }
    }
}
