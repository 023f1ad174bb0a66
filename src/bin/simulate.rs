//! Banking strategy simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS] [COMMAND]
//!
//! Examples:
//!   cargo run --bin simulate                                   # 50-step ladder, 1000 games
//!   cargo run --bin simulate -- --strategy constant:300 --strategy smart:300,100,50
//!   cargo run --bin simulate -- --ladder 20x250 --seed 42 --parallel
//!   cargo run --bin simulate -- explore --strategy tiers:10=300,20=600

use anyhow::Context;
use banksim::build_info::version_line;
use banksim::core::constants::{DEFAULT_ITERATIONS, DEFAULT_OUTLIER_MULTIPLE, DEFAULT_ROUNDS};
use banksim::simulator::{run_exploration, ExploreConfig};
use banksim::strategy::{constant_ladder, default_lineup, lineup_from_json, validate_lineup};
use banksim::{run_simulation, CancelToken, SimConfig, SimReport, Strategy};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare banking strategies for the two-dice bank game")]
struct Cli {
    /// Rounds per game
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS, global = true)]
    rounds: u32,

    /// Games to simulate
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS, global = true)]
    iterations: u32,

    /// Random seed for reproducible runs
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Save the JSON report (default file name is timestamped)
    #[arg(long, value_name = "FILE", num_args = 0..=1, global = true)]
    json: Option<Option<PathBuf>>,

    /// More logging (-v debug, -vv per-roll trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only warnings and the report
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a lineup of strategies against the same dice (default)
    Compare(CompareArgs),
    /// Measure one strategy against the best possible score
    Explore(ExploreArgs),
}

#[derive(Args, Debug, Default)]
struct CompareArgs {
    /// Strategy spec, repeatable: constant:300, after-round:15,
    /// tiers:10=300,20=600, smart:300,100,50[,1.0]
    #[arg(long = "strategy", value_name = "SPEC")]
    strategies: Vec<Strategy>,

    /// JSON file holding an array of strategies
    #[arg(long, value_name = "FILE")]
    lineup: Option<PathBuf>,

    /// Constant-threshold ladder, COUNTxSTEP (e.g. 50x200)
    #[arg(long, value_name = "COUNTxSTEP")]
    ladder: Option<Ladder>,

    /// Spread games across all cores
    #[arg(long)]
    parallel: bool,

    /// Leave games whose best possible score exceeds this multiple of the
    /// mean out of the score statistics
    #[arg(long, value_name = "MULTIPLE")]
    outlier_multiple: Option<f64>,
}

#[derive(Args, Debug)]
struct ExploreArgs {
    /// Strategy spec to explore
    #[arg(long, default_value = "tiers:10=300,20=600")]
    strategy: Strategy,

    /// Outlier multiple of the mean best possible score
    #[arg(long, default_value_t = DEFAULT_OUTLIER_MULTIPLE)]
    outlier_multiple: f64,

    /// Keep every game
    #[arg(long)]
    no_filter: bool,
}

#[derive(Debug, Clone, Copy)]
struct Ladder {
    count: u32,
    step: u64,
}

impl FromStr for Ladder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (count, step) = s
            .split_once('x')
            .ok_or_else(|| format!("expected COUNTxSTEP, got `{}`", s))?;
        Ok(Self {
            count: count
                .parse()
                .map_err(|_| format!("bad ladder count `{}`", count))?,
            step: step
                .parse()
                .map_err(|_| format!("bad ladder step `{}`", step))?,
        })
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::WARN
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Run `job` off the async runtime; Ctrl-C asks it to stop between games.
async fn run_interruptible<T, F>(cancel: &CancelToken, job: F) -> anyhow::Result<T>
where
    F: FnOnce() -> banksim::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut handle = tokio::task::spawn_blocking(job);
    tokio::select! {
        joined = &mut handle => Ok(joined??),
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => {
                    warn!("interrupt received, finishing the current game");
                    cancel.cancel();
                }
                Err(e) => warn!(error = %e, "could not listen for Ctrl-C"),
            }
            Ok(handle.await??)
        }
    }
}

fn resolve_lineup(args: &CompareArgs) -> anyhow::Result<Vec<Strategy>> {
    let mut lineup = Vec::new();
    if let Some(path) = &args.lineup {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading lineup {}", path.display()))?;
        lineup.extend(lineup_from_json(&json)?);
    }
    if let Some(ladder) = args.ladder {
        lineup.extend(constant_ladder(ladder.count, ladder.step)?);
    }
    lineup.extend(args.strategies.iter().cloned());
    if lineup.is_empty() {
        lineup = default_lineup();
    }
    validate_lineup(&lineup)?;
    Ok(lineup)
}

fn write_json(target: Option<PathBuf>, json: &str) -> anyhow::Result<()> {
    let path = target.unwrap_or_else(|| {
        PathBuf::from(format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        ))
    });
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("JSON report saved to: {}", path.display());
    Ok(())
}

fn print_banner() {
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              BANK STRATEGY SIMULATOR                          ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("{}", version_line());
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    print_banner();

    let cancel = CancelToken::new();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Compare(CompareArgs::default()));

    match command {
        Command::Compare(args) => {
            let lineup = resolve_lineup(&args)?;
            let config = SimConfig {
                rounds: cli.rounds,
                iterations: cli.iterations,
                seed: cli.seed,
                parallel: args.parallel,
                outlier_multiple: args.outlier_multiple,
            };
            config.validate()?;

            println!("Configuration:");
            println!("  Strategies:     {}", lineup.len());
            println!("  Games:          {}", config.iterations);
            println!("  Rounds:         {}", config.rounds);
            println!("  Parallel:       {}", config.parallel);
            if let Some(seed) = config.seed {
                println!("  Seed:           {}", seed);
            }
            println!();

            let job_config = config.clone();
            let job_cancel = cancel.clone();
            let results = run_interruptible(&cancel, move || {
                run_simulation(&job_config, &lineup, &job_cancel)
            })
            .await?;

            let report = SimReport::from_results(&results, config.outlier_multiple)?;
            println!("{}", report.to_text());
            if let Some(target) = cli.json {
                write_json(target, &report.to_json())?;
            }
        }
        Command::Explore(args) => {
            let config = ExploreConfig {
                games: cli.iterations,
                rounds: cli.rounds,
                seed: cli.seed,
                outlier_multiple: (!args.no_filter).then_some(args.outlier_multiple),
            };
            info!(strategy = args.strategy.name(), games = config.games, "exploring");

            let job_cancel = cancel.clone();
            let strategy = args.strategy;
            let report = run_interruptible(&cancel, move || {
                run_exploration(&config, &strategy, &job_cancel)
            })
            .await?;

            println!("{}", report.to_text());
            if let Some(target) = cli.json {
                write_json(target, &report.to_json())?;
            }
        }
    }

    Ok(())
}
