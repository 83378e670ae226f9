//! Generation, crossover and mutation operators
//!
//! Operators never modify their inputs; each returns fresh records.

use super::EvolutionEngine;
use crate::error::{EngineError, Result};
use crate::models::{application_id, resource_name, CategoricalField, NumericField, Record};
use chrono::Days;
use rand::Rng;

/// Probability that crossover swaps any single numeric field
pub const FIELD_SWAP_PROBABILITY: f64 = 0.5;

/// Probability that a firing mutation resamples one numeric field
pub const NUMERIC_MUTATION_PROBABILITY: f64 = 0.3;

/// Probability that a firing mutation resamples one categorical field
pub const CATEGORICAL_MUTATION_PROBABILITY: f64 = 0.2;

/// Generated dates fall within this many days after the start date, inclusive
pub const DATE_HORIZON_DAYS: u64 = 365;

const MAX_NAME_ID: u32 = 999_999;
const MAX_APPLICATION_NUMBER: u32 = 9_999;

impl<R: Rng> EvolutionEngine<R> {
    /// Draw a new individual from the reference statistics
    pub fn generate_individual(&mut self) -> Result<Record> {
        let stats = &self.stats;
        let rng = &mut self.rng;

        let business_unit = stats.sample_categorical(CategoricalField::BusinessUnit, rng)?;
        let environment = stats.sample_categorical(CategoricalField::Environment, rng)?;
        let cloud_provider = stats.sample_categorical(CategoricalField::CloudProvider, rng)?;
        let instance_type = stats.sample_categorical(CategoricalField::InstanceType, rng)?;

        let name = resource_name(
            &cloud_provider,
            &business_unit,
            &environment,
            rng.gen_range(0..=MAX_NAME_ID),
        );
        let app = application_id(rng.gen_range(0..=MAX_APPLICATION_NUMBER));

        let cpu_utilization = stats.sample_numeric(NumericField::CpuUtilization, rng)?;
        let memory_utilization = stats.sample_numeric(NumericField::MemoryUtilization, rng)?;
        let storage_utilization = stats.sample_numeric(NumericField::StorageUtilization, rng)?;
        let monthly_cost_usd = stats.sample_numeric(NumericField::MonthlyCostUsd, rng)?;
        let efficiency_score = stats.sample_numeric(NumericField::EfficiencyScore, rng)?;

        let offset = rng.gen_range(0..=DATE_HORIZON_DAYS);
        let date = self
            .start_date
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| {
                EngineError::configuration(format!(
                    "start date {} cannot be advanced by {} days",
                    self.start_date, offset
                ))
            })?;

        self.metrics.inc_individuals_generated();

        Ok(Record {
            resource_name: name,
            business_unit,
            environment,
            cloud_provider,
            instance_type,
            application_id: app,
            cpu_utilization,
            memory_utilization,
            storage_utilization,
            monthly_cost_usd,
            efficiency_score,
            date,
        })
    }

    /// Recombine two parents into two children.
    ///
    /// With probability `1 - crossover_rate` the children are copies of the
    /// parents. Otherwise each numeric field is swapped between the children
    /// on its own coin flip. Categorical, identity and date fields always
    /// stay with their own parent.
    pub fn crossover(&mut self, parent_a: &Record, parent_b: &Record) -> (Record, Record) {
        let mut child_a = parent_a.clone();
        let mut child_b = parent_b.clone();

        if !self.rng.gen_bool(self.config.crossover_rate) {
            return (child_a, child_b);
        }
        self.metrics.inc_crossover_events();

        for field in NumericField::ALL {
            if self.rng.gen_bool(FIELD_SWAP_PROBABILITY) {
                child_a = child_a.with_numeric(field, parent_b.numeric(field));
                child_b = child_b.with_numeric(field, parent_a.numeric(field));
            }
        }

        (child_a, child_b)
    }

    /// Return a possibly mutated copy of `record`.
    ///
    /// With probability `mutation_rate` the numeric and categorical branches
    /// are each tried independently. A categorical change to provider,
    /// business unit or environment regenerates `resource_name` with a
    /// fresh identifier.
    pub fn mutate(&mut self, record: &Record) -> Result<Record> {
        if !self.rng.gen_bool(self.config.mutation_rate) {
            return Ok(record.clone());
        }
        self.metrics.inc_mutation_events();

        let mut mutated = record.clone();

        if self.rng.gen_bool(NUMERIC_MUTATION_PROBABILITY) {
            let field = NumericField::ALL[self.rng.gen_range(0..NumericField::ALL.len())];
            let value = self.stats.sample_numeric(field, &mut self.rng)?;
            mutated = mutated.with_numeric(field, value);
        }

        if self.rng.gen_bool(CATEGORICAL_MUTATION_PROBABILITY) {
            let field = CategoricalField::ALL[self.rng.gen_range(0..CategoricalField::ALL.len())];
            let value = self.stats.sample_categorical(field, &mut self.rng)?;
            mutated = mutated.with_categorical(field, value);

            if field.is_name_component() {
                mutated.resource_name = resource_name(
                    &mutated.cloud_provider,
                    &mutated.business_unit,
                    &mutated.environment,
                    self.rng.gen_range(0..=MAX_NAME_ID),
                );
            }
        }

        Ok(mutated)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::EngineConfig;
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;

    #[test]
    fn test_generate_individual_respects_reference() {
        let mut engine = seeded_engine(3, EngineConfig::default());
        let stats = reference_stats();
        let start = engine.start_date();
        let end = start.checked_add_days(Days::new(DATE_HORIZON_DAYS)).unwrap();

        for _ in 0..200 {
            let record = engine.generate_individual().unwrap();
            for field in CategoricalField::ALL {
                let allowed = stats.values(field).unwrap();
                assert!(allowed.iter().any(|v| v == record.categorical(field)));
            }
            for field in NumericField::ALL {
                assert!(stats.range(field).unwrap().contains(record.numeric(field)));
            }
            assert!(record.date >= start && record.date <= end);
            assert!(record.name_id().is_some());
            assert!(record.application_id.starts_with("app-"));
            assert_eq!(record.application_id.len(), 8);
        }
    }

    #[test]
    fn test_single_value_reference_scenario() {
        let stats = reference_stats()
            .with_values(CategoricalField::BusinessUnit, ["finance"])
            .with_values(CategoricalField::Environment, ["prod"])
            .with_values(CategoricalField::CloudProvider, ["AWS"]);
        let mut engine = EvolutionEngine::new(
            EngineConfig::default(),
            stats,
            rand::rngs::StdRng::seed_from_u64(5),
        )
        .unwrap();

        let record = engine.generate_individual().unwrap();
        assert_eq!(record.business_unit, "finance");
        assert_eq!(record.environment, "prod");
        assert!((10.0..=90.0).contains(&record.cpu_utilization));
        assert!(record.resource_name.starts_with("aws-finance-db-"));
        assert!(record.resource_name.ends_with("-prod"));
    }

    #[test]
    fn test_crossover_never_touches_non_numeric_fields() {
        let config = EngineConfig::default().with_rates(0.1, 1.0);
        let mut engine = seeded_engine(9, config);

        for _ in 0..100 {
            let a = engine.generate_individual().unwrap();
            let b = engine.generate_individual().unwrap();
            let (ca, cb) = engine.crossover(&a, &b);

            for (child, parent) in [(&ca, &a), (&cb, &b)] {
                assert_eq!(child.resource_name, parent.resource_name);
                assert_eq!(child.application_id, parent.application_id);
                assert_eq!(child.date, parent.date);
                for field in CategoricalField::ALL {
                    assert_eq!(child.categorical(field), parent.categorical(field));
                }
            }
            for field in NumericField::ALL {
                let swapped = ca.numeric(field) == b.numeric(field)
                    && cb.numeric(field) == a.numeric(field);
                let kept = ca.numeric(field) == a.numeric(field)
                    && cb.numeric(field) == b.numeric(field);
                assert!(swapped || kept);
            }
        }
    }

    #[test]
    fn test_crossover_rate_zero_returns_parents() {
        let config = EngineConfig::default().with_rates(0.1, 0.0);
        let mut engine = seeded_engine(4, config);
        let a = engine.generate_individual().unwrap();
        let b = engine.generate_individual().unwrap();
        let (ca, cb) = engine.crossover(&a, &b);
        assert_eq!(ca, a);
        assert_eq!(cb, b);
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let config = EngineConfig::default().with_rates(0.0, 0.7);
        let mut engine = seeded_engine(6, config);
        let record = engine.generate_individual().unwrap();
        for _ in 0..50 {
            assert_eq!(engine.mutate(&record).unwrap(), record);
        }
    }

    #[test]
    fn test_mutation_keeps_closure_and_name_consistency() {
        let config = EngineConfig::default().with_rates(1.0, 0.7);
        let mut engine = seeded_engine(8, config);
        let stats = reference_stats();
        let original = engine.generate_individual().unwrap();

        let mut current = original.clone();
        let mut renamed = 0;
        for _ in 0..500 {
            let previous_id = current.name_id().unwrap().to_string();
            current = engine.mutate(&current).unwrap();
            for field in NumericField::ALL {
                assert!(stats.range(field).unwrap().contains(current.numeric(field)));
            }
            for field in CategoricalField::ALL {
                let allowed = stats.values(field).unwrap();
                assert!(allowed.iter().any(|v| v == current.categorical(field)));
            }
            let id = current.name_id().unwrap();
            if id != previous_id {
                renamed += 1;
            }
            assert_eq!(current.application_id, original.application_id);
            assert_eq!(current.date, original.date);
        }
        assert!(renamed > 0, "no mutation produced a fresh name id");
    }

    #[test]
    fn test_mutation_with_degenerate_ranges() {
        let mut stats = reference_stats();
        for field in NumericField::ALL {
            stats = stats.with_range(field, 7.0, 7.0);
        }
        let config = EngineConfig::default().with_rates(1.0, 0.7);
        let mut engine = EvolutionEngine::new(config, stats, rand::rngs::StdRng::seed_from_u64(2))
            .unwrap()
            .with_start_date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let record = engine.generate_individual().unwrap();
        for _ in 0..50 {
            let mutated = engine.mutate(&record).unwrap();
            for field in NumericField::ALL {
                assert_eq!(mutated.numeric(field), 7.0);
            }
        }
    }

    #[test]
    fn test_date_overflow_is_reported() {
        let mut engine = seeded_engine(1, EngineConfig::default()).with_start_date(NaiveDate::MAX);
        let failures = (0..20)
            .filter(|_| engine.generate_individual().is_err())
            .count();
        assert!(failures > 0);
    }
}
