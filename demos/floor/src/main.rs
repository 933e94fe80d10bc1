//! floor — the reference warehouse floor.
//!
//! A 30×30 grid with 200 racks in four blocks, two unloading docks on the
//! right edge, two loading docks along the bottom and one forklift per
//! dock.  Every `order_interval_ticks` each role receives a random order;
//! completions, tick summaries and forklift snapshots are written as CSV.
//!
//! ```text
//! floor [--ticks N] [--seed N] [--config FILE.json] [--output DIR] [--log-level LEVEL]
//! ```
//!
//! `RUST_LOG`, when set, overrides `--log-level`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wh_core::{Color, Role, SimConfig, Tick};
use wh_fleet::ForkLift;
use wh_inventory::{CompletedOrder, Inventory};
use wh_output::{CsvWriter, OutputWriter, SimOutputObserver};
use wh_sim::{ModelBuilder, OrderStats, SimObserver, TickSummary};
use wh_spatial::{GridLayout, Layout, LayoutConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_OUTPUT:    &str = "./output/floor";
const PROGRESS_INTERVAL: u64  = 250;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Shape of the optional `--config` JSON file.  Missing fields keep their
/// defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FloorConfig {
    sim:    SimConfig,
    layout: LayoutConfig,
}

struct Args {
    ticks:     Option<u64>,
    seed:      Option<u64>,
    config:    Option<PathBuf>,
    output:    PathBuf,
    log_level: String,
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} [--ticks N] [--seed N] [--config FILE.json] [--output DIR] [--log-level LEVEL]");
    println!();
    println!("Defaults: ticks and seed from the config, output {DEFAULT_OUTPUT}, log level info.");
}

fn parse_args() -> Result<Args> {
    let program = std::env::args().next().unwrap_or_else(|| "floor".to_string());
    let mut parsed = Args {
        ticks:     None,
        seed:      None,
        config:    None,
        output:    PathBuf::from(DEFAULT_OUTPUT),
        log_level: "info".to_string(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        if flag == "--help" || flag == "-h" {
            print_usage(&program);
            std::process::exit(0);
        }
        let value = args.next().with_context(|| format!("{flag} needs a value"))?;
        match flag.as_str() {
            "--ticks" => parsed.ticks = Some(value.parse().with_context(|| format!("bad --ticks {value}"))?),
            "--seed" => parsed.seed = Some(value.parse().with_context(|| format!("bad --seed {value}"))?),
            "--config" => parsed.config = Some(PathBuf::from(value)),
            "--output" => parsed.output = PathBuf::from(value),
            "--log-level" => parsed.log_level = value,
            other => {
                print_usage(&program);
                bail!("unknown flag {other}");
            }
        }
    }
    Ok(parsed)
}

fn load_config(args: &Args) -> Result<FloorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => FloorConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        config.sim.total_ticks = ticks;
    }
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    Ok(config)
}

// ── Observer wrapper with progress logging ────────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:     SimOutputObserver<W>,
    completed: u64,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_order_completed(&mut self, order: &CompletedOrder) {
        self.completed += 1;
        self.inner.on_order_completed(order);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        if summary.tick.is_every(PROGRESS_INTERVAL) {
            info!(
                tick = summary.tick.0,
                completed = self.completed,
                carrying = summary.carrying,
                idle = summary.idle,
                queued = summary.queued,
                "progress",
            );
        }
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, forklifts: &[ForkLift], inventory: &Inventory) {
        self.inner.on_snapshot(tick, forklifts, inventory);
    }

    fn on_sim_end(&mut self, final_tick: Tick, stats: &OrderStats) {
        self.inner.on_sim_end(final_tick, stats);
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

fn print_report(stats: &OrderStats, forklifts: &[ForkLift], inventory: &Inventory) {
    println!();
    println!("Completed orders");
    println!("  {:<10} {:>6}", "role", "count");
    for role in Role::ALL {
        println!("  {:<10} {:>6}", role.as_str(), stats.completed(role));
    }
    match (stats.mean_duration(), stats.max_duration()) {
        (Some(mean), Some(max)) => println!("  duration: mean {mean:.1} ticks, max {max} ticks"),
        _ => println!("  duration: no orders completed"),
    }

    println!();
    println!("Stock by color");
    for color in Color::ALL {
        println!("  {:<8} {:>5}", color.as_str(), inventory.stock_of(color));
    }

    println!();
    println!("Forklifts");
    println!("  {:<4} {:<10} {:<18} {:>8} {:>7}", "id", "role", "state", "position", "carried");
    for f in forklifts {
        println!(
            "  {:<4} {:<10} {:<18} {:>8} {:>7}",
            f.id().0,
            f.role().as_str(),
            f.label(),
            f.position().to_string(),
            f.carried_units(),
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = parse_args()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = load_config(&args)?;

    // 1. Floor.
    let layout = GridLayout::reference(&config.layout)?;
    println!("=== floor — warehouse simulation ===");
    println!(
        "Grid {}×{}  |  racks: {}  |  docks: {}  |  lanes: {}",
        layout.width(),
        layout.height(),
        layout.racks().len(),
        layout.docks().len(),
        layout.lane_count(),
    );
    println!("Ticks: {}  |  Seed: {}", config.sim.total_ticks, config.sim.seed);

    // 2. Model.
    let mut model = ModelBuilder::new(config.sim, layout).build()?;

    // 3. Output.
    let writer = CsvWriter::new(&args.output)
        .with_context(|| format!("opening output in {}", args.output.display()))?;
    let mut observer = ProgressObserver { inner: SimOutputObserver::new(writer), completed: 0 };

    // 4. Run.
    let t0 = Instant::now();
    model.run(&mut observer);
    let elapsed = t0.elapsed();

    if let Some(e) = observer.inner.take_error() {
        return Err(e).context("writing output");
    }

    print_report(model.stats(), model.forklifts(), model.inventory());
    println!();
    println!("Finished {} ticks in {:.2?}; output in {}", model.now().0, elapsed, args.output.display());
    Ok(())
}
