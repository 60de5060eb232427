use clap::Parser;
use log::info;
use stochmatch::experiment::{self, ExperimentConfig};
use stochmatch::{ArrivalMode, TypeGraph};

/// Compares online matching algorithms on a type graph read from stdin.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Number of simulated repetitions.
    #[arg(short, long, default_value_t = 1000)]
    repetitions: usize,
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
    /// Every type arrives exactly once in random order instead of being sampled.
    #[arg(long)]
    adversarial: bool,
    /// Samples for estimating the reference probabilities (defaults to the number of repetitions).
    #[arg(long)]
    estimate_samples: Option<usize>,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let g = TypeGraph::new_from_stdin()?;
    info!("read type graph with {} online types, {} offline vertices, {} edges", g.online_size(), g.offline_size(), g.edge_count());
    let cfg = ExperimentConfig {
        repetitions: args.repetitions,
        seed: args.seed,
        mode: if args.adversarial { ArrivalMode::Adversarial } else { ArrivalMode::Stochastic },
        estimate_samples: args.estimate_samples.unwrap_or(args.repetitions),
    };
    let report = experiment::run(&g, &cfg)?;
    info!("finished {} repetitions", cfg.repetitions);
    print!("{}", report);
    Ok(())
}
