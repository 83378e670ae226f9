//! FinOps synthetic data CLI
//!
//! Evolves synthetic resource cost-and-usage records from a reference
//! dataset, inspects reference statistics, and samples individuals.

mod commands;
mod config;
mod output;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::{evolve, sample, stats};
use crate::config::SynthConfig;

/// FinOps synthetic data generator
#[derive(Parser)]
#[command(name = "finops-synth")]
#[command(author, version, about = "Synthetic FinOps data generator", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/finops-synth/config.toml if present)
    #[arg(long, env = "SYNTH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, default_value = "table", global = true)]
    pub format: output::OutputFormat,

    /// Enable verbose (debug) logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evolve synthetic records and merge them into the dataset
    Evolve {
        /// Reference dataset (CSV)
        #[arg(long, short)]
        input: PathBuf,

        /// Output file (defaults to <input>_enhanced.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Write only the generated rows instead of the merged table
        #[arg(long)]
        generated_only: bool,

        /// Print Prometheus metrics after the run
        #[arg(long)]
        print_metrics: bool,

        #[command(flatten)]
        params: EvolutionArgs,
    },

    /// Show statistics derived from a reference dataset
    Stats {
        /// Reference dataset (CSV)
        #[arg(long, short)]
        input: PathBuf,
    },

    /// Generate individuals without evolving them
    Sample {
        /// Reference dataset (CSV)
        #[arg(long, short)]
        input: PathBuf,

        /// Number of individuals
        #[arg(long, short = 'n', default_value_t = 5)]
        count: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// First day of the generated date window (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
}

/// Evolution parameters that override configuration
#[derive(Args, Default)]
pub struct EvolutionArgs {
    /// Individuals per generation
    #[arg(long)]
    pub population_size: Option<usize>,

    /// Number of generations
    #[arg(long, short)]
    pub generations: Option<usize>,

    /// Mutation probability
    #[arg(long)]
    pub mutation_rate: Option<f64>,

    /// Crossover probability
    #[arg(long)]
    pub crossover_rate: Option<f64>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// First day of the generated date window (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

impl EvolutionArgs {
    fn apply(&self, config: &mut SynthConfig) {
        if let Some(population_size) = self.population_size {
            config.population_size = population_size;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(mutation_rate) = self.mutation_rate {
            config.mutation_rate = mutation_rate;
        }
        if let Some(crossover_rate) = self.crossover_rate {
            config.crossover_rate = crossover_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.start_date.is_some() {
            config.start_date = self.start_date;
        }
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = SynthConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Evolve {
            input,
            output,
            generated_only,
            print_metrics,
            params,
        } => {
            params.apply(&mut config);
            evolve::run(
                &config,
                evolve::EvolveOptions {
                    input,
                    output,
                    generated_only,
                    print_metrics,
                },
                cli.format,
            )?;
        }
        Commands::Stats { input } => {
            stats::run(&input, cli.format)?;
        }
        Commands::Sample {
            input,
            count,
            seed,
            start_date,
        } => {
            EvolutionArgs {
                seed,
                start_date,
                ..Default::default()
            }
            .apply(&mut config);
            sample::run(&config, &input, count, cli.format)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    if let Err(err) = run(cli) {
        output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
