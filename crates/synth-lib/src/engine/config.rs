//! Evolution parameters

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POPULATION_SIZE: usize = 100;
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.7;
pub const DEFAULT_GENERATIONS: usize = 50;

/// Configuration for an evolution run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Individuals per generation; constant across the run
    pub population_size: usize,
    /// Probability that `mutate` modifies its input
    pub mutation_rate: f64,
    /// Probability that `crossover` recombines its parents
    pub crossover_rate: f64,
    /// Generations used by `EvolutionEngine::run`
    pub generations: usize,
    /// Seed for the engine's random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            generations: DEFAULT_GENERATIONS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_rates(mut self, mutation_rate: f64, crossover_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self.crossover_rate = crossover_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EngineError::configuration(
                "population_size must be at least 1",
            ));
        }
        check_probability("mutation_rate", self.mutation_rate)?;
        check_probability("crossover_rate", self.crossover_rate)?;
        Ok(())
    }
}

fn check_probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::configuration(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )))
    }
}
