use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use u_charge::dispatching::RuleEngine;
use u_charge::generator::FleetGenerator;
use u_charge::input::{format_fleet, load_fleet};
use u_charge::search::{CapacitySearch, SearchConfig, SearchStrategy};

#[derive(Parser, Debug)]
#[command(name = "u-charge", about = "Find the minimum number of chargers for a shuttle fleet")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for the minimum charger count meeting an average-wait threshold.
    Run {
        /// Shuttle list (count line followed by `id priority arrival service` records).
        file: PathBuf,
        /// Maximum acceptable average waiting time in minutes.
        #[arg(allow_negative_numbers = true)]
        max_avg_wait: f64,
        /// Comma-separated dispatching rules (PRIORITY, FIFO, SPT, LPT).
        #[arg(long, default_value = "PRIORITY,FIFO")]
        policy: String,
        /// Evaluate candidate charger counts in parallel batches (0 = thread count).
        #[arg(long)]
        parallel: Option<usize>,
        /// Upper bound on the number of chargers tried.
        #[arg(long)]
        max_chargers: Option<usize>,
        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
        /// Only print the final result.
        #[arg(long, short)]
        quiet: bool,
    },
    /// Print a random fleet in the input format.
    Generate {
        /// Number of shuttles.
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 120)]
        horizon: i64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Run {
            file,
            max_avg_wait,
            policy,
            parallel,
            max_chargers,
            json,
            quiet,
        } => {
            let fleet = load_fleet(&file)
                .with_context(|| format!("failed to load shuttles from {}", file.display()))?;
            let rules = RuleEngine::parse_policy(&policy)?;

            let mut config = SearchConfig::new(max_avg_wait);
            if let Some(batch) = parallel {
                config = config.with_strategy(SearchStrategy::Parallel { batch });
            }
            if let Some(max) = max_chargers {
                config = config.with_max_chargers(max);
            }

            let outcome = CapacitySearch::new(config)
                .with_rule_engine(rules)
                .search(&fleet)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                if !quiet {
                    for event in &outcome.run.events {
                        println!("{event}");
                    }
                }
                println!("{outcome}");
            }
        }
        Command::Generate {
            count,
            seed,
            horizon,
        } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let fleet = FleetGenerator::new(count)
                .with_arrival_horizon(horizon)
                .generate(&mut rng)?;
            print!("{}", format_fleet(&fleet));
        }
    }

    Ok(())
}
