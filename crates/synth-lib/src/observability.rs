//! Observability infrastructure for the evolution engine
//!
//! Provides:
//! - Prometheus metrics (generations, operator events, fitness gauges, run duration)
//! - Structured logging with tracing

use crate::engine::GenerationSummary;
use prometheus::{
    register_gauge, register_histogram, register_int_counter, Encoder, Gauge, Histogram,
    IntCounter, TextEncoder,
};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};

/// Histogram buckets for whole-run durations (in seconds)
const DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

static GLOBAL_METRICS: OnceLock<EngineMetricsInner> = OnceLock::new();

struct EngineMetricsInner {
    generations_completed: IntCounter,
    individuals_generated: IntCounter,
    crossover_events: IntCounter,
    mutation_events: IntCounter,
    best_fitness: Gauge,
    mean_fitness: Gauge,
    evolution_duration_seconds: Histogram,
}

impl EngineMetricsInner {
    fn new() -> Self {
        Self {
            generations_completed: register_int_counter!(
                "finops_synth_generations_completed_total",
                "Total number of generations evaluated"
            )
            .expect("Failed to register generations_completed"),

            individuals_generated: register_int_counter!(
                "finops_synth_individuals_generated_total",
                "Total number of individuals created from reference statistics"
            )
            .expect("Failed to register individuals_generated"),

            crossover_events: register_int_counter!(
                "finops_synth_crossover_events_total",
                "Total number of crossover calls that recombined their parents"
            )
            .expect("Failed to register crossover_events"),

            mutation_events: register_int_counter!(
                "finops_synth_mutation_events_total",
                "Total number of mutate calls that produced a modified copy"
            )
            .expect("Failed to register mutation_events"),

            best_fitness: register_gauge!(
                "finops_synth_best_fitness",
                "Best fitness in the most recently evaluated generation"
            )
            .expect("Failed to register best_fitness"),

            mean_fitness: register_gauge!(
                "finops_synth_mean_fitness",
                "Mean fitness of the most recently evaluated generation"
            )
            .expect("Failed to register mean_fitness"),

            evolution_duration_seconds: register_histogram!(
                "finops_synth_evolution_duration_seconds",
                "Wall-clock time of complete evolve calls",
                DURATION_BUCKETS.to_vec()
            )
            .expect("Failed to register evolution_duration_seconds"),
        }
    }
}

/// Engine metrics for Prometheus exposition
///
/// Lightweight handle to the process-global metrics; clones share them.
#[derive(Clone)]
pub struct EngineMetrics {
    _private: (),
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EngineMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EngineMetricsInner {
        GLOBAL_METRICS.get_or_init(EngineMetricsInner::new)
    }

    pub fn record_generation(&self, summary: &GenerationSummary) {
        let inner = self.inner();
        inner.generations_completed.inc();
        inner.best_fitness.set(summary.best_fitness);
        inner.mean_fitness.set(summary.mean_fitness);
    }

    pub fn inc_individuals_generated(&self) {
        self.inner().individuals_generated.inc();
    }

    pub fn inc_crossover_events(&self) {
        self.inner().crossover_events.inc();
    }

    pub fn inc_mutation_events(&self) {
        self.inner().mutation_events.inc();
    }

    pub fn observe_evolution_duration(&self, duration: Duration) {
        self.inner()
            .evolution_duration_seconds
            .observe(duration.as_secs_f64());
    }
}

/// Render every registered metric in the Prometheus text format
pub fn render_metrics() -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Structured logger for evolution events
#[derive(Clone)]
pub struct StructuredLogger {
    run_label: String,
}

impl StructuredLogger {
    pub fn new(run_label: impl Into<String>) -> Self {
        Self {
            run_label: run_label.into(),
        }
    }

    pub fn run_label(&self) -> &str {
        &self.run_label
    }

    pub fn log_evolution_started(
        &self,
        population_size: usize,
        generations: usize,
        mutation_rate: f64,
        crossover_rate: f64,
    ) {
        info!(
            event = "evolution_started",
            run = %self.run_label,
            population_size = population_size,
            generations = generations,
            mutation_rate = mutation_rate,
            crossover_rate = crossover_rate,
            "Starting evolution"
        );
    }

    /// Log a generation progress checkpoint
    pub fn log_generation(&self, summary: &GenerationSummary) {
        info!(
            event = "generation_completed",
            run = %self.run_label,
            generation = summary.generation,
            best_fitness = summary.best_fitness,
            mean_fitness = summary.mean_fitness,
            elite_count = summary.elite_count,
            "Generation {} complete",
            summary.generation
        );
    }

    pub fn log_generation_detail(&self, summary: &GenerationSummary) {
        debug!(
            event = "generation_evaluated",
            run = %self.run_label,
            generation = summary.generation,
            best_fitness = summary.best_fitness,
            mean_fitness = summary.mean_fitness,
            "Generation evaluated"
        );
    }

    pub fn log_evolution_completed(
        &self,
        generations: usize,
        population_size: usize,
        best_fitness: Option<f64>,
        duration: Duration,
    ) {
        info!(
            event = "evolution_completed",
            run = %self.run_label,
            generations = generations,
            population_size = population_size,
            best_fitness = ?best_fitness,
            duration_ms = duration.as_millis() as u64,
            "Evolution complete"
        );
    }

    pub fn log_reference_loaded(&self, path: &Path, records: usize) {
        info!(
            event = "reference_loaded",
            run = %self.run_label,
            path = %path.display(),
            records = records,
            "Loaded reference dataset"
        );
    }

    pub fn log_export(&self, path: &Path, total_rows: usize, generated_rows: usize) {
        info!(
            event = "export_written",
            run = %self.run_label,
            path = %path.display(),
            total_rows = total_rows,
            generated_rows = generated_rows,
            "Wrote synthetic dataset"
        );
    }
}
