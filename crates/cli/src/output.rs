//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use synth_lib::Record;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Row for record tables
#[derive(Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Resource")]
    pub resource_name: String,
    #[tabled(rename = "Unit")]
    pub business_unit: String,
    #[tabled(rename = "Env")]
    pub environment: String,
    #[tabled(rename = "Provider")]
    pub cloud_provider: String,
    #[tabled(rename = "Instance")]
    pub instance_type: String,
    #[tabled(rename = "CPU")]
    pub cpu: String,
    #[tabled(rename = "Mem")]
    pub memory: String,
    #[tabled(rename = "Storage")]
    pub storage: String,
    #[tabled(rename = "Cost/mo")]
    pub cost: String,
    #[tabled(rename = "Efficiency")]
    pub efficiency: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Fitness")]
    pub fitness: String,
}

impl RecordRow {
    pub fn new(record: &Record, fitness: f64) -> Self {
        Self {
            resource_name: record.resource_name.clone(),
            business_unit: record.business_unit.clone(),
            environment: record.environment.clone(),
            cloud_provider: record.cloud_provider.clone(),
            instance_type: record.instance_type.clone(),
            cpu: format_percent(record.cpu_utilization),
            memory: format_percent(record.memory_utilization),
            storage: format_percent(record.storage_utilization),
            cost: format_usd(record.monthly_cost_usd),
            efficiency: format!("{:.1}", record.efficiency_score),
            date: record.date.format("%Y-%m-%d").to_string(),
            fitness: color_fitness(fitness),
        }
    }
}

/// A record paired with its fitness, for JSON output
#[derive(Serialize)]
pub struct ScoredRecord<'a> {
    #[serde(flatten)]
    pub record: &'a Record,
    pub fitness: f64,
}

/// Render rows with the shared table style
pub fn render_table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a utilization value
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a monthly cost in US dollars
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format a fitness score
pub fn format_fitness(fitness: f64) -> String {
    format!("{:.3}", fitness)
}

/// Color a fitness score by magnitude
pub fn color_fitness(fitness: f64) -> String {
    let formatted = format_fitness(fitness);
    if fitness >= 10.0 {
        formatted.green().to_string()
    } else if fitness >= 0.0 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}
