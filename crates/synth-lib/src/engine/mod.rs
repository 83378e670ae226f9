//! Evolution engine
//!
//! Generates synthetic records from reference statistics and evolves a
//! population of them toward higher fitness with elitist selection,
//! per-field crossover and resampling mutation.

mod config;
mod evolve;
mod operators;
mod scoring;

pub use config::{
    EngineConfig, DEFAULT_CROSSOVER_RATE, DEFAULT_GENERATIONS, DEFAULT_MUTATION_RATE,
    DEFAULT_POPULATION_SIZE,
};
pub use evolve::{GenerationSummary, ELITE_FRACTION_DIVISOR, PROGRESS_LOG_INTERVAL};
pub use operators::{
    CATEGORICAL_MUTATION_PROBABILITY, DATE_HORIZON_DAYS, FIELD_SWAP_PROBABILITY,
    NUMERIC_MUTATION_PROBABILITY,
};
pub use scoring::{
    fitness, mean, population_std_dev, EFFICIENCY_BONUS, EFFICIENCY_THRESHOLD,
    UTILIZATION_BAND, UTILIZATION_BONUS,
};

use crate::error::Result;
use crate::models::Record;
use crate::observability::{EngineMetrics, StructuredLogger};
use crate::reference::ReferenceStats;
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// An ordered set of records evolved together
pub type Population = Vec<Record>;

/// Evolution engine owning its random source and population history.
///
/// The reference table is shared read-only, so several engines may run
/// side by side on separate threads as long as each has its own generator.
pub struct EvolutionEngine<R = StdRng> {
    config: EngineConfig,
    stats: Arc<ReferenceStats>,
    rng: R,
    start_date: NaiveDate,
    history: Vec<GenerationSummary>,
    metrics: EngineMetrics,
    logger: StructuredLogger,
}

impl<R: Rng> EvolutionEngine<R> {
    /// Create an engine with an explicit random source.
    ///
    /// Fails with a configuration error on invalid parameters or a reference
    /// table with a missing field, an inverted range or an empty value set.
    pub fn new(
        config: EngineConfig,
        stats: impl Into<Arc<ReferenceStats>>,
        rng: R,
    ) -> Result<Self> {
        let stats = stats.into();
        config.validate()?;
        stats.validate()?;

        Ok(Self {
            config,
            stats,
            rng,
            start_date: Local::now().date_naive(),
            history: Vec::new(),
            metrics: EngineMetrics::new(),
            logger: StructuredLogger::new("default"),
        })
    }

    /// First day of the date window assigned to generated records
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    /// Label attached to this engine's log events
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.logger = StructuredLogger::new(label);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &ReferenceStats {
        &self.stats
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Per-generation summaries of the latest `evolve` call
    pub fn history(&self) -> &[GenerationSummary] {
        &self.history
    }

    pub fn fitness(&self, record: &Record) -> f64 {
        fitness(record)
    }

    /// Evolve for the configured number of generations
    pub fn run(&mut self) -> Result<Population> {
        self.evolve(self.config.generations)
    }
}

impl EvolutionEngine<StdRng> {
    /// Create an engine whose generator is seeded from `config.seed`, or
    /// from OS entropy when no seed is set
    pub fn from_config(config: EngineConfig, stats: impl Into<Arc<ReferenceStats>>) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, stats, rng)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::error::EngineError;
    use crate::models::NumericField;

    #[test]
    fn test_construction_rejects_bad_reference_table() {
        let stats = reference_stats().with_range(NumericField::CpuUtilization, 90.0, 10.0);
        let result = EvolutionEngine::new(EngineConfig::default(), stats, StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }

    #[test]
    fn test_construction_rejects_unsampleable_range() {
        let stats = reference_stats().with_range(NumericField::MonthlyCostUsd, -1.0e308, 1.0e308);
        let result = EvolutionEngine::new(EngineConfig::default(), stats, StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }

    #[test]
    fn test_construction_rejects_bad_config() {
        let config = EngineConfig::default().with_population_size(0);
        let result = EvolutionEngine::from_config(config, reference_stats());
        assert!(matches!(result, Err(EngineError::Configuration { .. })));
    }

    #[test]
    fn test_shared_reference_table() {
        let stats = Arc::new(reference_stats());
        let a = EvolutionEngine::from_config(EngineConfig::default(), Arc::clone(&stats)).unwrap();
        let b = EvolutionEngine::from_config(EngineConfig::default(), Arc::clone(&stats)).unwrap();
        assert_eq!(a.stats(), b.stats());
        assert_eq!(Arc::strong_count(&stats), 3);
    }
}
