use std::collections::BTreeSet;

use quadsim::{
    candidate_pairs, resolve, resolve_velocity, step, Body, BoundsRect, BroadPhase, Command,
    ConfigError, Contact, Engine, ExternalForce, ForceSet, NVec2, Parameters, PointAttractor,
    Quadtree, Scenario, ScenarioConfig, System, TickInput,
};

/// Body at (x, y) with velocity (vx, vy); mass follows from the radius
pub fn body(x: f64, y: f64, vx: f64, vy: f64, r: f64) -> Body {
    Body::new(NVec2::new(x, y), NVec2::new(vx, vy), r)
}

/// Engine with the default quadtree shape and speed range
pub fn engine(strategy: BroadPhase) -> Engine {
    Engine::new(strategy, 4, 8, 1.0, 0.0, 10.0)
}

pub fn world() -> BoundsRect {
    BoundsRect::from_size(800.0, 600.0)
}

/// One tick on an 800x600 world, no forces
pub fn tick(sys: &mut System, strategy: BroadPhase, dt: f64) {
    let input = TickInput::new(dt, 800.0, 600.0);
    step(sys, &input, &engine(strategy), &Parameters::default(), &ForceSet::new());
}

/// Seeded scenario with `count` random bodies
pub fn seeded(count: usize, seed: u64) -> Scenario {
    let yaml = format!(
        "engine:\n  broad_phase: \"indexed\"\nparameters:\n  seed: {seed}\nspawn:\n  count: {count}\n"
    );
    let cfg = ScenarioConfig::from_yaml_str(&yaml).expect("valid scenario");
    Scenario::build_scenario(cfg).expect("scenario builds")
}

// ==================================================================================
// BoundsRect tests
// ==================================================================================

#[test]
fn bounds_contains_is_inclusive_on_edges() {
    let r = BoundsRect::new(10.0, 20.0, 100.0, 50.0);
    assert!(r.contains(&NVec2::new(10.0, 20.0)));
    assert!(r.contains(&NVec2::new(110.0, 70.0)));
    assert!(!r.contains(&NVec2::new(110.001, 70.0)));
    assert!(!r.contains(&NVec2::new(9.999, 30.0)));
}

#[test]
fn bounds_touching_edges_intersect() {
    let a = BoundsRect::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundsRect::new(10.0, 0.0, 10.0, 10.0);
    let c = BoundsRect::new(10.5, 0.0, 10.0, 10.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
}

#[test]
fn bounds_quadrants_are_ne_nw_se_sw() {
    let q = BoundsRect::new(0.0, 0.0, 100.0, 80.0).quadrants();
    assert_eq!(q[0], BoundsRect::new(50.0, 0.0, 50.0, 40.0)); // NE
    assert_eq!(q[1], BoundsRect::new(0.0, 0.0, 50.0, 40.0)); // NW
    assert_eq!(q[2], BoundsRect::new(50.0, 40.0, 50.0, 40.0)); // SE
    assert_eq!(q[3], BoundsRect::new(0.0, 40.0, 50.0, 40.0)); // SW
}

// ==================================================================================
// Quadtree tests
// ==================================================================================

#[test]
fn quadtree_stays_a_leaf_until_capacity_is_exceeded() {
    let mut tree = Quadtree::new(world(), 4, 8);
    for i in 0..4 {
        assert!(tree.insert(i, NVec2::new(100.0 + i as f64, 100.0)));
    }
    assert_eq!(tree.node_count(), 1);

    tree.insert(4, NVec2::new(700.0, 500.0));
    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.nodes[0].items, vec![0, 1, 2, 3]);

    // fifth body went to the SE child
    let se = tree.nodes[0].children.expect("root subdivided")[2];
    assert_eq!(tree.nodes[se].items, vec![4]);
}

#[test]
fn quadtree_drops_out_of_bounds_bodies() {
    let bodies = vec![
        body(100.0, 100.0, 0.0, 0.0, 5.0),
        body(-50.0, 100.0, 0.0, 0.0, 5.0),
        body(400.0, 900.0, 0.0, 0.0, 5.0),
    ];
    let tree = Quadtree::build(world(), 4, 8, &bodies);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.dropped(), 2);
    assert_eq!(tree.query(&world()), vec![0]);
}

#[test]
fn quadtree_each_reference_stored_exactly_once() {
    let scenario = seeded(500, 3);
    let tree = Quadtree::build(world(), 4, 6, scenario.bodies());

    let mut seen = Vec::new();
    for node in &tree.nodes {
        seen.extend_from_slice(&node.items);
    }
    seen.sort_unstable();
    let expected: Vec<usize> = (0..500).collect();
    assert_eq!(seen, expected);
    assert_eq!(tree.len(), 500);
}

#[test]
fn quadtree_terminates_on_ten_thousand_coincident_bodies() {
    let n = 10_000;
    let mut tree = Quadtree::new(world(), 4, 5);
    for i in 0..n {
        assert!(tree.insert(i, NVec2::new(321.0, 123.0)));
    }

    assert!(tree.depth() <= 5);
    let all: BTreeSet<usize> = tree.query(&world()).into_iter().collect();
    assert_eq!(all.len(), n);
    assert_eq!(all.iter().next_back(), Some(&(n - 1)));
}

#[test]
fn quadtree_query_skips_far_nodes() {
    let bodies: Vec<Body> = (0..64)
        .map(|i| body(10.0 + (i % 8) as f64 * 5.0, 10.0 + (i / 8) as f64 * 5.0, 0.0, 0.0, 1.0))
        .chain(std::iter::once(body(750.0, 550.0, 0.0, 0.0, 1.0)))
        .collect();
    let tree = Quadtree::build(world(), 4, 8, &bodies);

    let near = tree.query(&BoundsRect::centered(NVec2::new(750.0, 550.0), 10.0, 10.0));
    assert!(near.contains(&64));
    assert!(near.len() < 10, "query returned {} candidates", near.len());
}

#[test]
fn quadtree_query_order_is_deterministic() {
    let scenario = seeded(200, 11);
    let region = BoundsRect::new(200.0, 150.0, 300.0, 200.0);
    let a = Quadtree::build(world(), 4, 8, scenario.bodies()).query(&region);
    let b = Quadtree::build(world(), 4, 8, scenario.bodies()).query(&region);
    assert_eq!(a, b);
}

#[test]
fn quadtree_level_bounds_cover_every_node() {
    let scenario = seeded(100, 5);
    let tree = Quadtree::build(world(), 2, 8, scenario.bodies());
    let levels = tree.level_bounds();
    assert_eq!(levels.len(), tree.node_count());
    assert_eq!(levels[0], world());
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn head_on_equal_masses_swap_velocities() {
    let mut a = body(100.0, 100.0, 50.0, 0.0, 10.0);
    let mut b = body(115.0, 100.0, -50.0, 0.0, 10.0);
    assert_eq!(a.m, 100.0);

    let contact = resolve(&mut a, &mut b, 1.0);

    assert!(contact.is_resolved());
    assert!((a.v - NVec2::new(-50.0, 0.0)).norm() < 1e-9, "a.v = {:?}", a.v);
    assert!((b.v - NVec2::new(50.0, 0.0)).norm() < 1e-9, "b.v = {:?}", b.v);
    assert!((b.x - a.x).norm() >= 20.0);
}

#[test]
fn separated_bodies_are_untouched() {
    let mut a = body(100.0, 100.0, 30.0, -7.0, 10.0);
    let mut b = body(120.0, 100.0, -30.0, 2.0, 10.0); // exactly touching
    let (a0, b0) = (a.clone(), b.clone());

    assert_eq!(resolve(&mut a, &mut b, 1.0), Contact::Separate);
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn coincident_bodies_are_skipped() {
    let mut a = body(50.0, 50.0, 10.0, 0.0, 5.0);
    let mut b = body(50.0, 50.0, -10.0, 0.0, 5.0);
    let (a0, b0) = (a.clone(), b.clone());

    assert_eq!(resolve(&mut a, &mut b, 1.0), Contact::Coincident);
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn separating_overlap_is_left_alone() {
    let mut a = body(100.0, 100.0, -10.0, 0.0, 10.0);
    let mut b = body(110.0, 100.0, 10.0, 0.0, 10.0);
    let (a0, b0) = (a.clone(), b.clone());

    assert_eq!(resolve(&mut a, &mut b, 1.0), Contact::Separating);
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn momentum_conserved_for_unequal_masses() {
    let mut a = body(0.0, 0.0, 40.0, 15.0, 5.0);
    let mut b = body(15.0, 6.0, -20.0, -5.0, 15.0);
    let before = a.momentum() + b.momentum();

    assert!(resolve_velocity(&mut a, &mut b, 1.0).is_resolved());
    let after = a.momentum() + b.momentum();

    assert!((after - before).norm() < 1e-9, "momentum drift {:?}", after - before);
}

#[test]
fn energy_never_increases() {
    for e in [0.0, 0.25, 0.5, 0.9, 1.0] {
        let mut a = body(0.0, 0.0, 60.0, 10.0, 8.0);
        let mut b = body(10.0, 3.0, -35.0, 0.0, 4.0);
        let before = a.kinetic_energy() + b.kinetic_energy();

        resolve(&mut a, &mut b, e);
        let after = a.kinetic_energy() + b.kinetic_energy();

        if e == 1.0 {
            assert!((after - before).abs() < 1e-6 * before, "e=1 lost energy: {before} -> {after}");
        } else {
            assert!(after < before, "e={e}: {before} -> {after}");
        }
    }
}

#[test]
fn positional_correction_splits_penetration() {
    let mut a = body(100.0, 100.0, 1.0, 0.0, 10.0);
    let mut b = body(110.0, 100.0, -1.0, 0.0, 10.0);

    match resolve(&mut a, &mut b, 1.0) {
        Contact::Resolved { penetration, .. } => assert_eq!(penetration, 10.0),
        other => panic!("expected a resolved contact, got {other:?}"),
    }
    assert_eq!(a.x, NVec2::new(95.0, 100.0));
    assert_eq!(b.x, NVec2::new(115.0, 100.0));
}

// ==================================================================================
// Step tests
// ==================================================================================

#[test]
fn step_reflects_on_both_axes_at_a_corner() {
    let mut sys = System { bodies: vec![body(12.0, 12.0, -300.0, -300.0, 10.0)], t: 0.0 };
    tick(&mut sys, BroadPhase::Indexed, 0.1);

    let b = &sys.bodies[0];
    assert_eq!(b.x, NVec2::new(10.0, 10.0));
    assert_eq!(b.v, NVec2::new(300.0, 300.0));
}

#[test]
fn step_reflects_off_far_walls() {
    let mut sys = System { bodies: vec![body(785.0, 585.0, 400.0, 400.0, 10.0)], t: 0.0 };
    tick(&mut sys, BroadPhase::BruteForce, 0.1);

    let b = &sys.bodies[0];
    assert_eq!(b.x, NVec2::new(790.0, 590.0));
    assert_eq!(b.v, NVec2::new(-400.0, -400.0));
}

#[test]
fn non_positive_dt_does_not_move_bodies() {
    for dt in [0.0, -0.5, f64::NAN] {
        let mut sys = System { bodies: vec![body(200.0, 200.0, 30.0, 40.0, 5.0)], t: 0.0 };
        let before = sys.bodies.clone();
        tick(&mut sys, BroadPhase::Indexed, dt);
        assert_eq!(sys.bodies, before, "dt = {dt}");
        assert_eq!(sys.t, 0.0);
    }
}

#[test]
fn speed_factor_scales_the_drift() {
    let mut sys = System { bodies: vec![body(100.0, 100.0, 10.0, 0.0, 5.0)], t: 0.0 };
    let eng = Engine::new(BroadPhase::Indexed, 4, 8, 3.0, 0.0, 10.0);
    let input = TickInput::new(1.0, 800.0, 600.0);
    step(&mut sys, &input, &eng, &Parameters::default(), &ForceSet::new());
    assert_eq!(sys.bodies[0].x, NVec2::new(130.0, 100.0));
}

#[test]
fn step_reports_pair_checks() {
    let mut sys = System {
        bodies: (0..10).map(|i| body(50.0 + 70.0 * i as f64, 300.0, 0.0, 0.0, 5.0)).collect(),
        t: 0.0,
    };
    let input = TickInput::new(0.016, 800.0, 600.0);
    let report = step(&mut sys, &input, &engine(BroadPhase::BruteForce), &Parameters::default(), &ForceSet::new());
    assert_eq!(report.pair_checks(), 45);
    assert_eq!(report.pairs.resolved, 0);

    let report = step(&mut sys, &input, &engine(BroadPhase::Indexed), &Parameters::default(), &ForceSet::new());
    assert!(report.pair_checks() < 45);
    assert_eq!(report.pairs.indexed, 10);
}

#[test]
fn strategies_agree_on_isolated_pairs() {
    // approaching pairs spread over the world, each far from the others
    let mut bodies = Vec::new();
    for k in 0..6 {
        let cx = 80.0 + 120.0 * k as f64;
        let cy = 100.0 + 70.0 * k as f64;
        bodies.push(body(cx, cy, 20.0 + k as f64, 5.0, 6.0 + k as f64));
        bodies.push(body(cx + 10.0, cy + 2.0, -15.0, -3.0, 4.0));
    }
    let mut brute = System { bodies: bodies.clone(), t: 0.0 };
    let mut indexed = System { bodies, t: 0.0 };

    tick(&mut brute, BroadPhase::BruteForce, 1.0 / 60.0);
    tick(&mut indexed, BroadPhase::Indexed, 1.0 / 60.0);

    assert_eq!(brute.bodies, indexed.bodies);
}

#[test]
fn indexed_candidates_cover_every_overlap() {
    let scenario = seeded(800, 21);
    let bodies = scenario.bodies();

    let candidates: BTreeSet<(usize, usize)> =
        candidate_pairs(bodies, &world(), BroadPhase::Indexed, 4, 8).into_iter().collect();

    let mut overlaps = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let d = (bodies[j].x - bodies[i].x).norm();
            if d < bodies[i].radius + bodies[j].radius {
                overlaps += 1;
                assert!(candidates.contains(&(i, j)), "pair ({i}, {j}) missed");
            }
        }
    }
    assert!(overlaps > 0, "scenario should contain overlapping bodies");
}

// ==================================================================================
// Force tests
// ==================================================================================

#[test]
fn attractor_pulls_toward_target_inside_radius() {
    let attractor = PointAttractor { radius: 150.0, strength: 5.0 };
    let mut bodies = vec![body(100.0, 0.0, 0.0, 0.0, 2.0), body(100.0, 0.0, 0.0, 0.0, 20.0)];

    attractor.apply(0.1, Some(NVec2::zeros()), &mut bodies);

    // 5 * (150 - 100) * 0.1, independent of mass
    for b in &bodies {
        assert!((b.v - NVec2::new(-25.0, 0.0)).norm() < 1e-12);
    }
}

#[test]
fn attractor_ignores_far_bodies_and_missing_target() {
    let attractor = PointAttractor { radius: 50.0, strength: 5.0 };
    let mut bodies = vec![body(100.0, 0.0, 1.0, 2.0, 2.0)];
    let before = bodies.clone();

    attractor.apply(0.1, Some(NVec2::zeros()), &mut bodies);
    assert_eq!(bodies, before);

    let near = PointAttractor { radius: 500.0, strength: 5.0 };
    near.apply(0.1, None, &mut bodies);
    assert_eq!(bodies, before);
}

// ==================================================================================
// Engine & scenario tests
// ==================================================================================

#[test]
fn speed_factor_is_clamped() {
    let mut eng = engine(BroadPhase::Indexed);
    assert_eq!(eng.adjust_speed(100.0), 10.0);
    assert_eq!(eng.adjust_speed(-0.5), 9.5);
    assert_eq!(eng.adjust_speed(-100.0), 0.0);
    assert_eq!(eng.set_speed(f64::NAN), 0.0);
}

#[test]
fn toggle_switches_strategy() {
    let mut eng = engine(BroadPhase::Indexed);
    assert_eq!(eng.toggle_broad_phase(), BroadPhase::BruteForce);
    assert_eq!(eng.toggle_broad_phase(), BroadPhase::Indexed);
}

#[test]
fn same_seed_same_bodies() {
    let a = seeded(50, 99);
    let b = seeded(50, 99);
    let c = seeded(50, 100);
    assert_eq!(a.bodies(), b.bodies());
    assert_ne!(a.bodies(), c.bodies());
}

#[test]
fn commands_only_touch_the_end_of_the_sequence() {
    let mut s = seeded(20, 1);
    let prefix: Vec<Body> = s.bodies().to_vec();

    s.apply(Command::AddBodies(5));
    assert_eq!(s.bodies().len(), 25);
    assert_eq!(&s.bodies()[..20], prefix.as_slice());

    s.apply(Command::Burst { at: NVec2::new(400.0, 300.0), count: 30 });
    assert_eq!(s.bodies().len(), 55);
    assert!(s.bodies()[25..].iter().all(|b| b.x == NVec2::new(400.0, 300.0)));

    s.apply(Command::RemoveBodies(40));
    assert_eq!(s.bodies(), &prefix[..15]);

    s.apply(Command::RemoveBodies(1000));
    assert!(s.bodies().is_empty());
}

#[test]
fn commands_adjust_engine() {
    let mut s = seeded(0, 1);
    s.apply(Command::ToggleBroadPhase);
    assert_eq!(s.engine.broad_phase, BroadPhase::BruteForce);
    s.apply(Command::AdjustSpeed(2.5));
    assert_eq!(s.engine.speed_factor(), 3.5);
    s.apply(Command::AddBodies(3));
    s.apply(Command::Clear);
    assert!(s.bodies().is_empty());
}

#[test]
fn burst_fans_out_without_sticking() {
    let mut s = seeded(0, 4);
    s.apply(Command::Burst { at: NVec2::new(400.0, 300.0), count: 30 });
    for _ in 0..60 {
        s.tick(&TickInput::new(1.0 / 60.0, 800.0, 600.0));
    }
    let spread = s.bodies().iter().map(|b| (b.x - NVec2::new(400.0, 300.0)).norm()).fold(0.0, f64::max);
    assert!(spread > 30.0, "burst did not spread: {spread}");
}

#[test]
fn overlay_matches_quadtree() {
    let s = seeded(300, 8);
    let overlay = s.index_overlay(800.0, 600.0);
    assert!(overlay.len() > 1);
    assert_eq!(overlay[0], world());
}

#[test]
fn explicit_bodies_come_first() {
    let yaml = r#"
engine:
  broad_phase: "brute_force"
bodies:
  - x: [ 100.0, 100.0 ]
    v: [  50.0,   0.0 ]
    radius: 10.0
    tint: [ 1, 2, 3 ]
spawn:
  count: 4
"#;
    let s = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();
    assert_eq!(s.bodies().len(), 5);
    assert_eq!(s.bodies()[0].m, 100.0);
    assert_eq!(s.bodies()[0].tint, [1, 2, 3]);
    assert_eq!(s.engine.broad_phase, BroadPhase::BruteForce);
}

// ==================================================================================
// Config validation tests
// ==================================================================================

#[test]
fn config_rejects_bad_values() {
    let cases = [
        ("engine:\n  broad_phase: \"indexed\"\n  node_capacity: 0\n", "capacity"),
        ("engine:\n  broad_phase: \"indexed\"\n  speed_min: 5.0\n  speed_max: 1.0\n", "speed"),
        ("engine:\n  broad_phase: \"indexed\"\nparameters:\n  restitution: 1.5\n", "restitution"),
        (
            "engine:\n  broad_phase: \"indexed\"\nbodies:\n  - x: [1.0, 1.0]\n    v: [0.0, 0.0]\n    radius: 0.0\n",
            "radius",
        ),
        ("engine:\n  broad_phase: \"indexed\"\nspawn:\n  radius_min: 5.0\n  radius_max: 2.0\n", "spawn"),
    ];

    for (yaml, what) in cases {
        let err = ScenarioConfig::from_yaml_str(yaml).expect_err(what);
        let ok = match what {
            "capacity" => matches!(err, ConfigError::ZeroCapacity),
            "speed" => matches!(err, ConfigError::SpeedBounds { .. }),
            "restitution" => matches!(err, ConfigError::Restitution(_)),
            "radius" => matches!(err, ConfigError::BodyRadius { index: 0, .. }),
            "spawn" => matches!(err, ConfigError::SpawnRadius { .. }),
            _ => false,
        };
        assert!(ok, "{what}: unexpected error {err}");
    }
}

#[test]
fn config_rejects_unknown_strategy() {
    let err = ScenarioConfig::from_yaml_str("engine:\n  broad_phase: \"octree\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}
