//! Sample command: draw individuals without evolving them

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use synth_lib::engine::fitness;
use synth_lib::EvolutionEngine;

use super::{load_reference, run_label};
use crate::config::SynthConfig;
use crate::output::{print_warning, render_table, OutputFormat, RecordRow, ScoredRecord};

/// Generate `count` individuals from the reference statistics and print them
pub fn run(config: &SynthConfig, input: &Path, count: usize, format: OutputFormat) -> Result<()> {
    let (_, stats) = load_reference(input)?;

    let mut engine = EvolutionEngine::from_config(config.engine_config(), stats)
        .context("Invalid evolution configuration")?
        .with_label(run_label(input));
    if let Some(start_date) = config.start_date {
        engine = engine.with_start_date(start_date);
    }

    let records = (0..count)
        .map(|_| engine.generate_individual())
        .collect::<synth_lib::Result<Vec<_>>>()
        .context("Failed to generate individuals")?;

    match format {
        OutputFormat::Json => {
            let scored: Vec<ScoredRecord> = records
                .iter()
                .map(|record| ScoredRecord {
                    record,
                    fitness: fitness(record),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&scored)?);
        }
        OutputFormat::Table => {
            if records.is_empty() {
                print_warning("No individuals requested");
                return Ok(());
            }
            println!("{}", "Sampled Individuals".bold());
            println!("{}", "=".repeat(50));
            println!(
                "{}",
                render_table(records.iter().map(|r| RecordRow::new(r, fitness(r))))
            );
        }
    }

    Ok(())
}
