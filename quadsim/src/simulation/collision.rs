//! Narrow-phase contact test and impulse response between two bodies
//!
//! A single response policy is used everywhere: the mass-weighted impulse
//! along the contact normal, followed by an even split of the penetration
//! depth as positional correction. With equal masses and restitution 1 it
//! reduces to exchanging the normal velocity components.

use tracing::debug;

use crate::simulation::states::{Body, NVec2};

/// Outcome of a narrow-phase test between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Circles do not touch (`dist >= ra + rb`)
    Separate,
    /// Centers coincide exactly, no contact normal exists
    Coincident,
    /// Overlapping but already moving apart along the normal
    Separating,
    /// Impulse and positional correction applied
    Resolved {
        normal: NVec2,
        impulse: f64,
        penetration: f64,
    },
}

impl Contact {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Contact::Resolved { .. })
    }
}

/// Overlapping pair geometry: unit normal from `a` to `b`, center distance and
/// the contact distance `ra + rb`
struct Overlap {
    normal: NVec2,
    dist: f64,
    min_dist: f64,
}

fn overlap(a: &Body, b: &Body) -> Result<Overlap, Contact> {
    let d = b.x - a.x;
    let dist = d.norm();
    let min_dist = a.radius + b.radius;

    if dist >= min_dist {
        return Err(Contact::Separate);
    }
    if dist == 0.0 {
        return Err(Contact::Coincident);
    }

    Ok(Overlap {
        normal: d / dist,
        dist,
        min_dist,
    })
}

/// Apply the impulse for an overlapping pair, returning the impulse magnitude,
/// or `None` when the bodies are already separating
fn apply_impulse(a: &mut Body, b: &mut Body, n: &NVec2, restitution: f64) -> Option<f64> {
    // relative velocity along the normal
    let vn = (b.v - a.v).dot(n);
    if vn > 0.0 {
        return None;
    }

    let e = restitution.clamp(0.0, 1.0);
    let j = -(1.0 + e) * vn / (a.m.recip() + b.m.recip());

    a.v -= (j / a.m) * *n;
    b.v += (j / b.m) * *n;
    Some(j)
}

/// Test `a` against `b` and, if they overlap and approach each other, apply
/// the impulse response and push them apart.
///
/// No-op cases (both bodies left bit-for-bit unchanged):
/// - not touching (`dist >= a.radius + b.radius`)
/// - exactly coincident centers (no defined normal, logged at debug level)
/// - already separating along the normal
pub fn resolve(a: &mut Body, b: &mut Body, restitution: f64) -> Contact {
    let ov = match overlap(a, b) {
        Ok(ov) => ov,
        Err(Contact::Coincident) => {
            debug!(x = a.x.x, y = a.x.y, "coincident bodies, contact skipped");
            return Contact::Coincident;
        }
        Err(c) => return c,
    };

    let Some(j) = apply_impulse(a, b, &ov.normal, restitution) else {
        return Contact::Separating;
    };

    // each body takes half the penetration depth
    let penetration = ov.min_dist - ov.dist;
    let push = ov.normal * (penetration * 0.5);
    a.x -= push;
    b.x += push;

    Contact::Resolved {
        normal: ov.normal,
        impulse: j,
        penetration,
    }
}

/// Velocity-only variant of [`resolve`]: identical contact test and impulse,
/// but positions are not corrected.
pub fn resolve_velocity(a: &mut Body, b: &mut Body, restitution: f64) -> Contact {
    let ov = match overlap(a, b) {
        Ok(ov) => ov,
        Err(c) => return c,
    };

    match apply_impulse(a, b, &ov.normal, restitution) {
        Some(j) => Contact::Resolved {
            normal: ov.normal,
            impulse: j,
            penetration: ov.min_dist - ov.dist,
        },
        None => Contact::Separating,
    }
}

/// Resolve bodies `i` and `j` of a slice in place.
///
/// `i` and `j` must differ; the lower index plays the role of `a`.
pub fn resolve_pair(bodies: &mut [Body], i: usize, j: usize, restitution: f64) -> Contact {
    debug_assert_ne!(i, j, "a body cannot collide with itself");
    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    let (head, tail) = bodies.split_at_mut(hi);
    resolve(&mut head[lo], &mut tail[0], restitution)
}
