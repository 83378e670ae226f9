//! CLI command implementations

pub mod evolve;
pub mod sample;
pub mod stats;

use anyhow::{Context, Result};
use std::path::Path;
use synth_lib::{dataset, Record, ReferenceStats};

/// Read a reference dataset and derive its statistics
pub(crate) fn load_reference(input: &Path) -> Result<(Vec<Record>, ReferenceStats)> {
    let records = dataset::read_records(input)
        .with_context(|| format!("Failed to read reference dataset {}", input.display()))?;
    let stats = ReferenceStats::from_records(&records)
        .with_context(|| format!("Failed to derive reference statistics from {}", input.display()))?;
    Ok((records, stats))
}

/// Label for log events: the input file stem
pub(crate) fn run_label(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "default".to_string())
}
