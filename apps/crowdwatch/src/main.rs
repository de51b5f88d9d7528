//! crowdwatch - periodic crowd congestion readout.
//!
//! Every cycle picks a simulated hour, estimates the crowd on each route,
//! classifies it against the route's capacity and prints one line per route.
//! With no arguments it monitors the built-in route table forever, drawing a
//! random hour between 06:00 and 20:00 and pausing 5 s between cycles.
//!
//! Status goes to stdout; logs go to stderr.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cw_core::{Hour, HourWindow, SimRng};
use cw_estimate::{BaselineSource, Estimator, EstimatorConfig, FixedBaselines};
use cw_monitor::{
    HourSelector, JsonReporter, Monitor, MonitorBuilder, MonitorConfig, MonitorResult, TextReporter,
};
use cw_routes::{RouteRegistry, load_routes_csv};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "crowdwatch")]
#[command(about = "Per-route crowd congestion readout for a large public gathering")]
struct Cli {
    /// RNG seed.  Omit for a different run every time.
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate every cycle at this hour (0-23) instead of a random one
    #[arg(long, conflicts_with = "sweep")]
    hour: Option<u32>,

    /// Step through the operating hours (06:00-20:00) one per cycle
    #[arg(long)]
    sweep: bool,

    /// Pin every baseline draw to this value, within 1000-4000 (for demos and
    /// reproducible checks)
    #[arg(long)]
    baseline: Option<u32>,

    /// Seconds to wait between cycles
    #[arg(long, default_value = "5")]
    interval_secs: u64,

    /// Stop after this many cycles (default: run until killed)
    #[arg(long)]
    cycles: Option<u64>,

    /// Route table CSV (route_id,length_km,capacity).  Default: built-in routes.
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Exit on the first route that fails to evaluate
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // 1. Route registry.  Invalid routes abort here, before any cycle runs.
    let registry = match &cli.routes {
        Some(path) => load_routes_csv(path)
            .with_context(|| format!("loading routes from {}", path.display()))?,
        None => RouteRegistry::default_routes().context("building built-in route table")?,
    };

    // 2. Randomness.  Hours get their own child stream so a fixed hour does
    //    not shift the baseline sequence.
    let mut root = match cli.seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };
    let hours = match (cli.hour, cli.sweep) {
        (Some(h), _) => HourSelector::Fixed(Hour::new(h).context("--hour")?),
        (None, true) => HourSelector::sweep(HourWindow::OPERATING),
        (None, false) => HourSelector::random(root.child(1)),
    };

    let config = MonitorConfig {
        cycle_interval: Duration::from_secs(cli.interval_secs),
        max_cycles:     cli.cycles,
        strict:         cli.strict,
    };

    info!(
        routes = registry.len(),
        interval_secs = cli.interval_secs,
        seed = ?cli.seed,
        "crowdwatch starting"
    );

    // 3. Build and run.
    match cli.baseline {
        Some(b) => {
            let limits = EstimatorConfig::default();
            let pinned = FixedBaselines::pinned(b, limits.baseline_min..=limits.baseline_max)
                .context("--baseline")?;
            let monitor = MonitorBuilder::new(registry, pinned)
                .hours(hours)
                .config(config)
                .build()?;
            run(monitor, cli.format)
        }
        None => {
            let monitor = MonitorBuilder::new(registry, root)
                .hours(hours)
                .config(config)
                .build()?;
            run(monitor, cli.format)
        }
    }
}

fn run<S: BaselineSource>(mut monitor: Monitor<Estimator, S>, format: Format) -> Result<()> {
    // Nothing raises this: the process ends on an external signal, with no
    // cleanup to do.  Bounded runs end via --cycles.
    let cancel = AtomicBool::new(false);

    match format {
        Format::Text => {
            let mut reporter = TextReporter::new(io::stdout().lock());
            finish(monitor.run_until(&cancel, &mut reporter), reporter.take_error())
        }
        Format::Json => {
            let mut reporter = JsonReporter::new(io::stdout().lock());
            finish(monitor.run_until(&cancel, &mut reporter), reporter.take_error())
        }
    }
}

/// Merge the loop result with any stored output error.
fn finish(result: MonitorResult<()>, output_error: Option<io::Error>) -> Result<()> {
    if let Some(e) = output_error {
        bail!("writing status output: {e}");
    }
    result?;
    Ok(())
}
