use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod driver;
mod output;
mod provenance;
mod summary;

use config::SimConfig;
use driver::{Driver, Schedule};
use output::{ensure_dir, RunFiles};

#[derive(Parser)]
#[command(name = "cubeball")]
#[command(about = "Monte Carlo sampler of random cubical balls")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run a simulation from a config file
    Run {
        #[arg(long)]
        config: PathBuf,
        /// Directory for measurement rows, dumps and provenance
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Run the consistency checker after every N sweeps
        #[arg(long)]
        check_every: Option<usize>,
    },
    /// Print per-column means of a measurement file as JSON
    Summary {
        #[arg(long)]
        input: PathBuf,
        /// Leading rows to drop (inflation and thermalization)
        #[arg(long, default_value_t = 0)]
        skip: usize,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            config,
            out_dir,
            check_every,
        } => run(config, out_dir, check_every),
        Action::Summary { input, skip } => summarize(input, skip),
    }
}

fn run(config: PathBuf, out_dir: PathBuf, check_every: Option<usize>) -> Result<()> {
    let cfg = SimConfig::load(&config)?;
    info!(
        config = %config.display(),
        name = %cfg.name,
        seed = cfg.seed,
        target_volume = cfg.target_volume,
        start_size = cfg.start_size,
        lambda = cfg.lambda,
        alpha = cfg.alpha,
        epsilon = cfg.epsilon,
        "run"
    );
    ensure_dir(&out_dir)?;
    let files = RunFiles::new(&out_dir, &cfg.name);

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut driver = Driver::new(&cfg);
    let schedule = Schedule::from_config(&cfg, check_every);
    let mut rows = files.open_measurements()?;
    let report = driver.run(&schedule, &mut rng, &mut rows)?;
    rows.into_inner()
        .with_context(|| format!("flushing {}", files.measurements.display()))?;

    files.write_dumps(&driver.ball)?;

    let payload = provenance::Payload::new(serde_json::to_value(&cfg)?)
        .with_outputs(files.all())
        .with_report(json!({
            "rows": report.rows,
            "checks": report.checks,
            "final_volume": report.final_volume,
            "final_boundary": report.final_boundary,
            "final_lambda": driver.couplings.lambda,
            "final_alpha": driver.couplings.alpha,
            "accepted": report.stats.accepted,
            "rejected": report.stats.rejected,
            "invalid": report.stats.invalid,
            "pool_exhausted": report.stats.exhausted,
            "acceptance": driver.stats().acceptance_rate(),
        }));
    let prov = provenance::write_sidecar(&out_dir, &cfg.name, payload)?;
    info!(path = %prov.display(), "wrote provenance");
    Ok(())
}

fn summarize(input: PathBuf, skip: usize) -> Result<()> {
    let means = summary::column_means(&input, skip)?;
    println!("{}", serde_json::to_string_pretty(&means)?);
    Ok(())
}
