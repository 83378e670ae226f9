//! Generational driver loop

use super::scoring::{fitness, mean};
use super::{EvolutionEngine, Population};
use crate::error::Result;
use crate::models::Record;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Elites are the top `population_size / ELITE_FRACTION_DIVISOR` individuals
pub const ELITE_FRACTION_DIVISOR: usize = 10;

/// Progress is logged at info level every this many generations
pub const PROGRESS_LOG_INTERVAL: usize = 10;

/// Fitness snapshot of one evaluated generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// 1-based generation number
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
    pub elite_count: usize,
}

impl<R: Rng> EvolutionEngine<R> {
    /// Run the generational loop and return the final population.
    ///
    /// Each generation is scored and stably sorted by descending fitness, the
    /// top tenth is copied forward unchanged, and the rest is bred from
    /// parents drawn with replacement from the top half. The returned
    /// population is in breeding order, not re-sorted.
    pub fn evolve(&mut self, generations: usize) -> Result<Population> {
        let started = Instant::now();
        let size = self.config.population_size;
        let elite_count = size / ELITE_FRACTION_DIVISOR;
        let pool_size = (size / 2).max(1);

        self.history.clear();
        self.logger.log_evolution_started(
            size,
            generations,
            self.config.mutation_rate,
            self.config.crossover_rate,
        );

        let mut population = (0..size)
            .map(|_| self.generate_individual())
            .collect::<Result<Population>>()?;

        for generation in 1..=generations {
            let scored = rank(population);

            let summary = GenerationSummary {
                generation,
                best_fitness: scored.first().map(|(_, s)| *s).unwrap_or(f64::NAN),
                mean_fitness: mean(&scored.iter().map(|(_, s)| *s).collect::<Vec<_>>()),
                elite_count,
            };
            self.metrics.record_generation(&summary);
            self.logger.log_generation_detail(&summary);
            if generation % PROGRESS_LOG_INTERVAL == 0 {
                self.logger.log_generation(&summary);
            }
            self.history.push(summary);

            let mut next: Population = scored
                .iter()
                .take(elite_count)
                .map(|(record, _)| record.clone())
                .collect();

            let parents = &scored[..pool_size.min(scored.len())];
            while next.len() < size {
                let parent_a = &parents[self.rng.gen_range(0..parents.len())].0;
                let parent_b = &parents[self.rng.gen_range(0..parents.len())].0;

                let (child_a, child_b) = self.crossover(parent_a, parent_b);
                next.push(self.mutate(&child_a)?);
                next.push(self.mutate(&child_b)?);
            }
            next.truncate(size);

            population = next;
        }

        let duration = started.elapsed();
        self.metrics.observe_evolution_duration(duration);
        self.logger.log_evolution_completed(
            generations,
            population.len(),
            self.history.iter().map(|s| s.best_fitness).reduce(f64::max),
            duration,
        );

        Ok(population)
    }
}

/// Score and stably sort by descending fitness; ties keep their prior order
fn rank(population: Population) -> Vec<(Record, f64)> {
    let mut scored: Vec<(Record, f64)> = population
        .into_iter()
        .map(|record| {
            let score = fitness(&record);
            (record, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}
