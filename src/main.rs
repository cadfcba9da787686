//! Dice Posterior - CLI
//!
//! Infers the hidden sum of a dice roll from Higher/Equal/Lower observations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dice_posterior::{
    commands::{
        BenchmarkConfig, RunConfig, query_sequence, run_benchmark, run_inference,
        summarize_model,
    },
    core::DiceConfig,
    inference::StrategyType,
    model::{DiceModel, Enumeration},
    output::{
        UnobservablePolicy, print_benchmark_result, print_model_summary, print_query_result,
        print_run_summary,
    },
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dice_posterior",
    about = "Infer the most likely dice sum from Higher/Equal/Lower observations",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Number of dice
    #[arg(short, long, global = true, default_value = "2")]
    dice: usize,

    /// Sides per die
    #[arg(short, long, global = true, default_value = "6")]
    sides: usize,

    /// Engine: log (default, underflow-safe) or direct
    #[arg(
        long,
        global = true,
        default_value = "log",
        value_parser = ["log", "log-domain", "direct", "linear"]
    )]
    strategy: String,

    /// Count table construction: convolution (default) or exhaustive
    #[arg(
        long,
        global = true,
        default_value = "convolution",
        value_parser = ["convolution", "exhaustive", "product"]
    )]
    enumeration: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute posteriors for every line of an input file and write a CSV table
    Run {
        /// Input file with one H/E/L sequence per line
        input: PathBuf,

        /// Output CSV path
        output: PathBuf,

        /// Skip malformed rows with a warning instead of aborting
        #[arg(long)]
        skip_invalid: bool,

        /// Unobservable rows: mark (default) or skip
        #[arg(long, default_value = "mark", value_parser = ["mark", "skip"])]
        unobservable: String,

        /// Process rows on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Show the count table, prior, and observation lookup table
    Table {
        /// Show natural logs in the lookup table
        #[arg(long)]
        log: bool,
    },

    /// Compute the posterior for a single sequence
    Query {
        /// Observation sequence, e.g. HHEL
        sequence: String,

        /// Also run the other engine and compare
        #[arg(short, long)]
        compare: bool,
    },

    /// Simulate hidden rolls and measure MAP accuracy
    Benchmark {
        /// Number of simulated rolls
        #[arg(short = 'n', long, default_value = "1000")]
        rounds: usize,

        /// Observations per simulated roll
        #[arg(short = 'k', long, default_value = "10")]
        observations: usize,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let model = build_model(&cli)?;
    let strategy = StrategyType::from_name(&cli.strategy);

    match cli.command {
        Commands::Run {
            input,
            output,
            skip_invalid,
            unobservable,
            sequential,
        } => {
            let config = RunConfig {
                strategy,
                skip_invalid,
                unobservable: UnobservablePolicy::from_name(&unobservable),
                parallel: !sequential,
                ..RunConfig::new(input, output)
            };
            let summary = run_inference(&model, &config)?;
            print_run_summary(&summary);
            Ok(())
        }
        Commands::Table { log } => {
            print_model_summary(&summarize_model(&model), log);
            Ok(())
        }
        Commands::Query { sequence, compare } => {
            let result = query_sequence(&model, &sequence, strategy, compare)?;
            print_query_result(&result);
            Ok(())
        }
        Commands::Benchmark {
            rounds,
            observations,
            seed,
        } => {
            let config = BenchmarkConfig {
                seed,
                ..BenchmarkConfig::new(rounds, observations)
            };
            let result = run_benchmark(&model, &config)?;
            print_benchmark_result(&result);
            Ok(())
        }
    }
}

fn build_model(cli: &Cli) -> Result<DiceModel> {
    let config = DiceConfig::new(cli.dice, cli.sides).context("invalid dice configuration")?;
    let enumeration = Enumeration::from_name(&cli.enumeration);

    let model = DiceModel::build(config, enumeration)
        .with_context(|| format!("failed to build model for {config}"))?;
    info!(dice = %config, domain = %model.domain(), ?enumeration, "built model");

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn accepts_known_option_names() {
        let cli = Cli::try_parse_from([
            "dice_posterior",
            "--strategy",
            "direct",
            "--enumeration",
            "exhaustive",
            "query",
            "HHL",
        ])
        .unwrap();

        assert_eq!(cli.strategy, "direct");
        assert_eq!(cli.enumeration, "exhaustive");
    }

    #[test]
    fn rejects_misspelled_option_names() {
        for args in [
            ["dice_posterior", "--strategy", "direkt", "query", "H"],
            ["dice_posterior", "--enumeration", "exhaustve", "query", "H"],
            ["dice_posterior", "run", "in.txt", "out.csv", "--unobservable=drop"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{args:?}");
        }
    }
}
