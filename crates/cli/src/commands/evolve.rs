//! Evolve command: generate synthetic records and merge them into a dataset

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use synth_lib::engine::{fitness, PROGRESS_LOG_INTERVAL};
use synth_lib::{dataset, render_metrics, EvolutionEngine, GenerationSummary, StructuredLogger};
use tabled::Tabled;

use super::{load_reference, run_label};
use crate::config::SynthConfig;
use crate::output::{format_fitness, print_info, print_success, render_table, OutputFormat, RecordRow};

/// Number of fittest records shown after a run
const TOP_RECORDS: usize = 5;

/// Options for a single evolve invocation
pub struct EvolveOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub generated_only: bool,
    pub print_metrics: bool,
}

/// Row for the generation progress table
#[derive(Tabled)]
struct GenerationRow {
    #[tabled(rename = "Generation")]
    generation: usize,
    #[tabled(rename = "Best")]
    best: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Elites")]
    elites: usize,
}

#[derive(Serialize)]
struct EvolutionReport<'a> {
    input: &'a Path,
    output: &'a Path,
    reference_rows: usize,
    generated_rows: usize,
    total_rows: usize,
    population_size: usize,
    generations: usize,
    best_fitness: Option<f64>,
    history: &'a [GenerationSummary],
}

/// `<dir>/<stem>_enhanced.csv` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    input.with_file_name(format!("{}_enhanced.csv", stem))
}

/// Run an evolution against the input dataset and write the result
pub fn run(config: &SynthConfig, options: EvolveOptions, format: OutputFormat) -> Result<()> {
    let label = run_label(&options.input);
    let logger = StructuredLogger::new(label.clone());

    let (reference, stats) = load_reference(&options.input)?;
    logger.log_reference_loaded(&options.input, reference.len());

    let mut engine = EvolutionEngine::from_config(config.engine_config(), stats)
        .context("Invalid evolution configuration")?
        .with_label(label);
    if let Some(start_date) = config.start_date {
        engine = engine.with_start_date(start_date);
    }

    let population = engine.run().context("Evolution failed")?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&options.input));
    let total_rows = if options.generated_only {
        dataset::write_records(&output, &population)?;
        population.len()
    } else {
        dataset::merge_and_write(&reference, &population, &output)?
    };
    logger.log_export(&output, total_rows, population.len());

    let history = engine.history();
    let best_fitness = history.iter().map(|s| s.best_fitness).reduce(f64::max);

    match format {
        OutputFormat::Json => {
            let report = EvolutionReport {
                input: &options.input,
                output: &output,
                reference_rows: reference.len(),
                generated_rows: population.len(),
                total_rows,
                population_size: config.population_size,
                generations: config.generations,
                best_fitness,
                history,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            println!("{}", "Evolution Summary".bold());
            println!("{}", "=".repeat(50));
            println!("Reference rows:         {}", reference.len());
            println!("Population size:        {}", config.population_size);
            println!("Generations:            {}", config.generations);
            println!(
                "Rates (mut/cross):      {} / {}",
                config.mutation_rate, config.crossover_rate
            );
            if let Some(seed) = config.seed {
                println!("Seed:                   {}", seed);
            }
            if let Some(best) = best_fitness {
                println!("Best fitness:           {}", format_fitness(best).green());
            }
            println!();

            if !history.is_empty() {
                println!("{}", "Progress".bold());
                println!("{}", "-".repeat(50));
                let rows = history
                    .iter()
                    .enumerate()
                    .filter(|(i, s)| {
                        s.generation % PROGRESS_LOG_INTERVAL == 0 || *i + 1 == history.len()
                    })
                    .map(|(_, s)| GenerationRow {
                        generation: s.generation,
                        best: format_fitness(s.best_fitness),
                        mean: format_fitness(s.mean_fitness),
                        elites: s.elite_count,
                    });
                println!("{}", render_table(rows));
                println!();
            }

            let mut scored: Vec<_> = population.iter().map(|r| (r, fitness(r))).collect();
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
            println!("{}", "Fittest Records".bold());
            println!("{}", "-".repeat(50));
            println!(
                "{}",
                render_table(
                    scored
                        .iter()
                        .take(TOP_RECORDS)
                        .map(|(r, f)| RecordRow::new(r, *f))
                )
            );
            println!();

            if options.generated_only {
                print_info(&format!("Wrote only the {} generated rows", population.len()));
            }
            print_success(&format!(
                "Wrote {} rows to {}",
                total_rows,
                output.display()
            ));
        }
    }

    if options.print_metrics {
        print!("{}", render_metrics()?);
    }

    Ok(())
}
