//! Fixed-step position integration and wall handling
//!
//! Explicit Euler drift scaled by the engine's speed factor, followed by
//! per-axis reflection off the world rectangle. [`contain`] is the
//! position-only clamp run at the end of a tick.

use super::bounds::BoundsRect;
use super::states::Body;

/// Step length actually used: non-finite or negative `dt` becomes 0.
pub fn effective_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Advance positions: x_n+1 = x_n + v_n * dt * speed_factor
pub fn drift(bodies: &mut [Body], dt: f64, speed_factor: f64) {
    let h = effective_dt(dt) * speed_factor;
    if h == 0.0 {
        return;
    }
    for b in bodies.iter_mut() {
        b.x += b.v * h;
    }
}

/// Reflect bodies that crossed a wall.
///
/// Each axis is handled on its own so a body hitting a corner bounces on both
/// axes in the same tick. The position is clamped back inside and that axis's
/// velocity component is negated.
pub fn reflect(bodies: &mut [Body], world: &BoundsRect) {
    for b in bodies.iter_mut() {
        let r = b.radius;

        // x axis
        if b.x.x - r < world.x {
            b.x.x = world.x + r;
            b.v.x = -b.v.x;
        } else if b.x.x + r > world.right() {
            b.x.x = world.right() - r;
            b.v.x = -b.v.x;
        }

        // y axis
        if b.x.y - r < world.y {
            b.x.y = world.y + r;
            b.v.y = -b.v.y;
        } else if b.x.y + r > world.bottom() {
            b.x.y = world.bottom() - r;
            b.v.y = -b.v.y;
        }
    }
}

/// Clamp positions so every body lies fully inside `world`; velocities are
/// untouched. On an axis narrower than the body's diameter the body is
/// centred on that axis.
pub fn contain(bodies: &mut [Body], world: &BoundsRect) {
    for b in bodies.iter_mut() {
        b.x.x = clamp_axis(b.x.x, b.radius, world.x, world.right());
        b.x.y = clamp_axis(b.x.y, b.radius, world.y, world.bottom());
    }
}

fn clamp_axis(p: f64, r: f64, lo: f64, hi: f64) -> f64 {
    if hi - lo < 2.0 * r {
        0.5 * (lo + hi)
    } else {
        p.clamp(lo + r, hi - r)
    }
}
