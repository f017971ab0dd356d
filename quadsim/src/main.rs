use quadsim::{bench_broad_phase, BroadPhase, NVec2, Scenario, ScenarioConfig, TickInput};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: usize,

    /// Fixed time step in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Override the scenario's broad phase
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Attractor target held for the whole run
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    target: Option<Vec<f64>>,

    /// Log a summary every this many ticks
    #[arg(long, default_value_t = 60)]
    report_every: usize,

    /// Run the broad-phase benchmark instead of a scenario
    #[arg(long)]
    bench: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StrategyArg {
    BruteForce,
    Indexed,
}

impl From<StrategyArg> for BroadPhase {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::BruteForce => BroadPhase::BruteForce,
            StrategyArg::Indexed => BroadPhase::Indexed,
        }
    }
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {file_name}"))?;
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    if args.bench {
        bench_broad_phase();
        return Ok(());
    }

    let cfg = load_scenario_from_yaml(&args.file_name)?;
    let (width, height) = (cfg.world.width, cfg.world.height);
    let mut scenario = Scenario::build_scenario(cfg)?;

    if let Some(strategy) = args.strategy {
        scenario.engine.broad_phase = strategy.into();
    }

    info!(
        bodies = scenario.bodies().len(),
        strategy = ?scenario.engine.broad_phase,
        "starting headless run of {} ticks",
        args.ticks
    );

    let mut input = TickInput::new(args.dt, width, height);
    if let Some(&[x, y]) = args.target.as_deref() {
        input = input.with_target(NVec2::new(x, y));
    }

    let every = args.report_every.max(1);
    let mut checks_total = 0usize;
    for tick in 1..=args.ticks {
        let report = scenario.tick(&input);
        checks_total += report.pair_checks();

        if tick % every == 0 {
            info!(
                tick,
                checks = report.pair_checks(),
                resolved = report.pairs.resolved,
                depth = report.pairs.tree_depth,
                nodes = report.pairs.tree_nodes,
                energy = scenario.system.total_kinetic_energy(),
                "progress"
            );
        }
    }

    let p = scenario.system.total_momentum();
    info!(
        t = scenario.system.t,
        checks_total,
        momentum_x = p.x,
        momentum_y = p.y,
        energy = scenario.system.total_kinetic_energy(),
        "done"
    );

    Ok(())
}
