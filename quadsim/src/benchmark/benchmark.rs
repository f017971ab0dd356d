use std::time::Instant;

use crate::simulation::broad_phase::BroadPhase;
use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};
use crate::simulation::step::{step, TickInput};

const WIDTH: f64 = 1600.0;
const HEIGHT: f64 = 1200.0;
const DT: f64 = 1.0 / 60.0;

/// Time brute force against the quadtree for a range of body counts.
/// Prints CSV so the output can be pasted straight into a spreadsheet.
pub fn bench_broad_phase() {
    println!("N,brute_ms,indexed_ms,brute_checks,indexed_checks");

    let ns = [100, 200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        // Small n: average over a few ticks to smooth noise
        // Large n: fewer ticks so brute force doesn't take minutes
        let ticks = if n <= 800 { 20 } else { 3 };
        let template = make_system(n);

        let (ms_brute, checks_brute) = time_ticks(&template, BroadPhase::BruteForce, ticks);
        let (ms_indexed, checks_indexed) = time_ticks(&template, BroadPhase::Indexed, ticks);

        println!("{},{:.6},{:.6},{},{}", n, ms_brute, ms_indexed, checks_brute, checks_indexed);
    }
}

/// Run `ticks` steps on a copy of `template`, returning milliseconds per tick
/// and the pair checks of the last tick
fn time_ticks(template: &System, strategy: BroadPhase, ticks: usize) -> (f64, usize) {
    let mut sys = template.clone();
    let engine = Engine::new(strategy, 4, 8, 1.0, 0.0, 10.0);
    let params = Parameters::default();
    let forces = ForceSet::new();
    let input = TickInput::new(DT, WIDTH, HEIGHT);

    // Warm-up
    step(&mut sys, &input, &engine, &params, &forces);

    let mut checks = 0;
    let t0 = Instant::now();
    for _ in 0..ticks {
        checks = step(&mut sys, &input, &engine, &params, &forces).pair_checks();
    }
    let ms = t0.elapsed().as_secs_f64() * 1000.0 / ticks as f64;
    (ms, checks)
}

/// Helper to build a manual System of size `n`
fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            WIDTH * 0.5 + (i_f * 0.37).sin() * (WIDTH * 0.45),
            HEIGHT * 0.5 + (i_f * 0.13).cos() * (HEIGHT * 0.45),
        );
        let v = NVec2::new((i_f * 0.71).cos() * 120.0, (i_f * 0.53).sin() * 120.0);
        bodies.push(Body::new(x, v, 3.0 + (i % 4) as f64));
    }

    System { bodies, t: 0.0 }
}
