//! Stats command: show the reference statistics table

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use synth_lib::{CategoricalField, NumericField};
use tabled::Tabled;

use super::load_reference;
use crate::output::{render_table, OutputFormat};

/// Row for numeric ranges table
#[derive(Tabled)]
struct RangeRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
}

/// Row for categorical values table
#[derive(Tabled)]
struct ValueSetRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Distinct")]
    count: usize,
    #[tabled(rename = "Values")]
    values: String,
}

/// Show statistics derived from a reference dataset
pub fn run(input: &Path, format: OutputFormat) -> Result<()> {
    let (records, stats) = load_reference(input)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Table => {
            println!("{}", "Reference Statistics".bold());
            println!("{}", "=".repeat(50));
            println!("Dataset:                {}", input.display().to_string().cyan());
            println!("Records:                {}", records.len());
            println!();

            let mut ranges = Vec::new();
            for field in NumericField::ALL {
                let range = stats.range(field)?;
                ranges.push(RangeRow {
                    field: field.name(),
                    min: format!("{:.2}", range.min),
                    max: format!("{:.2}", range.max),
                });
            }
            println!("{}", "Numeric Ranges".bold());
            println!("{}", "-".repeat(50));
            println!("{}", render_table(ranges));
            println!();

            let mut value_sets = Vec::new();
            for field in CategoricalField::ALL {
                let values = stats.values(field)?;
                value_sets.push(ValueSetRow {
                    field: field.name(),
                    count: values.len(),
                    values: values.join(", "),
                });
            }
            println!("{}", "Categorical Values".bold());
            println!("{}", "-".repeat(50));
            println!("{}", render_table(value_sets));
        }
    }

    Ok(())
}
